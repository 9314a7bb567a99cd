//! Invocation Guard: decides whether a resolved method may be called from a URL.

use crate::controller::{ControllerType, MethodSpec, Visibility};
use crate::error::{AccessDenial, RouterError, RouterErrorKind};
use crate::router::naming::INTERNAL_MARKER;
use std::path::Path;

/// Check `method` on `ty` against the dispatch rules, in order:
///
/// 1. constructor name or internal marker prefix → access denied
/// 2. no such member → method not found
/// 3. not public → access denied
/// 4. fewer parameters supplied than [`MethodSpec::required_count`] → parameter
///    count mismatch
///
/// # Errors
///
/// A [`RouterError`] for the first rule that fails.
pub fn check<'t>(
    ty: &'t ControllerType,
    method: &str,
    supplied: usize,
    resource: &Path,
) -> Result<&'t MethodSpec, RouterError> {
    let fail = |kind: RouterErrorKind| RouterError {
        kind,
        type_name: ty.name().to_string(),
        method: method.to_string(),
        resource: resource.to_path_buf(),
    };

    if method.eq_ignore_ascii_case(ty.constructor_name()) {
        return Err(fail(RouterErrorKind::AccessDenied(AccessDenial::Constructor)));
    }
    if method.starts_with(INTERNAL_MARKER) {
        return Err(fail(RouterErrorKind::AccessDenied(AccessDenial::InternalMarker)));
    }

    let spec = ty
        .method(method)
        .ok_or_else(|| fail(RouterErrorKind::MethodNotFound))?;

    if spec.visibility() != Visibility::Public {
        return Err(fail(RouterErrorKind::AccessDenied(AccessDenial::NotPublic(
            spec.visibility(),
        ))));
    }

    let required = spec.required_count();
    if required > supplied {
        return Err(fail(RouterErrorKind::ParameterCount { required, supplied }));
    }
    Ok(spec)
}
