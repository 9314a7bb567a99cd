//! Path Parser: raw virtual path → ordered segments.

use smallvec::SmallVec;

/// Maximum number of path segments before heap allocation.
/// `controller/method/p1/p2/p3/p4` covers nearly every real request.
pub const MAX_INLINE_SEGMENTS: usize = 8;

/// Stack-allocated segment storage for the resolve path.
pub type SegmentVec = SmallVec<[String; MAX_INLINE_SEGMENTS]>;

/// Remove transport artifacts from a virtual path: anything from the first
/// `?`, every leading `/` and exactly one trailing `/`.
#[must_use]
pub fn normalize(raw: &str) -> &str {
    let path = raw.split_once('?').map_or(raw, |(path, _)| path);
    let path = path.trim_start_matches('/');
    path.strip_suffix('/').unwrap_or(path)
}

/// Split a normalized path into segments.
///
/// The empty path yields no segments. Interior empty segments are kept
/// (`a//b` → `["a", "", "b"]`) so parameter positions never shift.
#[must_use]
pub fn split_segments(path: &str) -> SegmentVec {
    if path.is_empty() {
        return SegmentVec::new();
    }
    path.split('/').map(str::to_string).collect()
}

/// [`normalize`] then [`split_segments`].
#[must_use]
pub fn parse(raw: &str) -> SegmentVec {
    split_segments(normalize(raw))
}
