//! Hierarchy path parser.
//!
//! Decomposes a slash-delimited address string into a typed [`TreePath`].
//! Segments are interpreted strictly by position in hierarchy order:
//!
//! | position | literal form | level |
//! |---|---|---|
//! | 0 | canonical UUID (8-4-4-4-12) | container |
//! | 1 | `<hi>.<lo>` decimal pair | object |
//! | 2 | non-empty byte string | dkey |
//! | 3 | non-empty byte string | akey |
//! | 4 | `{<start>-<end>}`, end exclusive | record extent |
//!
//! At any position the literal form may instead be the index form `[<n>]`,
//! addressing that level as the engine-enumerated Nth child of its parent.
//! A malformed segment at any position fails the whole parse; no partial
//! descriptor is ever returned.

use objdbg_error::{ObjdbgError, Result};
use objdbg_types::{ContainerId, KeyBuf, Level, ObjectId, RecordExtent, TreePath};
use uuid::Uuid;

/// Parse a slash-delimited hierarchy address into a [`TreePath`].
///
/// `None` and `""` are the root path (nothing addressed). Leading, trailing,
/// and doubled separators are ignored, so `/a/b/` parses identically to
/// `a/b`.
pub fn parse_tree_path(input: Option<&str>) -> Result<TreePath> {
    let mut path = TreePath::root();
    let Some(input) = input else {
        return Ok(path);
    };

    for (position, segment) in input.split('/').filter(|s| !s.is_empty()).enumerate() {
        match position {
            0 => path.cont = parse_level(segment, parse_container)?,
            1 => path.oid = parse_level(segment, parse_object_id)?,
            2 => path.dkey = parse_level(segment, parse_key)?,
            3 => path.akey = parse_level(segment, parse_key)?,
            4 => path.recx = parse_level(segment, parse_extent)?,
            _ => {
                return Err(ObjdbgError::invalid(format!(
                    "unexpected segment '{segment}' past the record-extent level"
                )));
            }
        }
    }
    Ok(path)
}

/// Parse one segment as either the index form `[<n>]` or the level's
/// literal form.
fn parse_level<T>(segment: &str, literal: fn(&str) -> Result<T>) -> Result<Level<T>> {
    if segment.starts_with('[') {
        return Ok(Level::Index(parse_index(segment)?));
    }
    Ok(Level::Value(literal(segment)?))
}

fn parse_index(segment: &str) -> Result<u32> {
    let inner = segment
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| {
            ObjdbgError::invalid(format!("malformed index segment '{segment}'"))
        })?;
    parse_decimal(inner)
        .map_err(|()| ObjdbgError::invalid(format!("invalid index '{inner}' in '{segment}'")))
}

fn parse_container(segment: &str) -> Result<ContainerId> {
    // Canonical hyphenated form only: the uuid crate also accepts simple,
    // braced, and URN forms, which are not valid address syntax here.
    const CANONICAL_LEN: usize = 36;
    if segment.len() != CANONICAL_LEN {
        return Err(ObjdbgError::invalid(format!(
            "container segment '{segment}' is not a canonical UUID"
        )));
    }
    Uuid::parse_str(segment).map_err(|_| {
        ObjdbgError::invalid(format!(
            "container segment '{segment}' is not a canonical UUID"
        ))
    })
}

fn parse_object_id(segment: &str) -> Result<ObjectId> {
    let bad = || {
        ObjdbgError::invalid(format!(
            "object segment '{segment}' is not a <hi>.<lo> decimal pair"
        ))
    };
    let (hi, lo) = segment.split_once('.').ok_or_else(bad)?;
    let hi = parse_decimal(hi).map_err(|()| bad())?;
    let lo = parse_decimal(lo).map_err(|()| bad())?;
    Ok(ObjectId::new(hi, lo))
}

fn parse_key(segment: &str) -> Result<KeyBuf> {
    // Non-empty is guaranteed by the separator filter; the copy detaches the
    // key from the input line.
    Ok(KeyBuf::from(segment))
}

fn parse_extent(segment: &str) -> Result<RecordExtent> {
    let bad = || {
        ObjdbgError::invalid(format!(
            "extent segment '{segment}' is not a {{<start>-<end>}} range"
        ))
    };
    let inner = segment
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .ok_or_else(bad)?;
    let (start, end) = inner.split_once('-').ok_or_else(bad)?;
    let start: u64 = parse_decimal(start).map_err(|()| bad())?;
    let end: u64 = parse_decimal(end).map_err(|()| bad())?;
    if end <= start {
        return Err(ObjdbgError::invalid(format!(
            "extent segment '{segment}' is empty or inverted (end is exclusive)"
        )));
    }
    Ok(RecordExtent::new(start, end - start))
}

/// Strict unsigned decimal parse: digits only, no sign, no whitespace.
/// Overflow and stray characters are both failures.
fn parse_decimal<T: std::str::FromStr>(s: &str) -> std::result::Result<T, ()> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(());
    }
    s.parse().map_err(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONT: &str = "12345678-1234-1234-1234-123456789012";

    fn parse(input: &str) -> TreePath {
        parse_tree_path(Some(input)).unwrap_or_else(|e| panic!("path {input:?}: {e}"))
    }

    fn assert_invalid(input: &str) {
        let err = parse_tree_path(Some(input)).expect_err("path should be rejected");
        assert!(
            matches!(err, ObjdbgError::InvalidArgument { .. }),
            "path: {input:?}, got: {err}"
        );
    }

    fn cont_id() -> ContainerId {
        Uuid::parse_str(CONT).unwrap()
    }

    #[test]
    fn empty_and_absent_inputs_are_root() {
        assert_eq!(parse_tree_path(None).expect("absent input"), TreePath::root());
        assert_eq!(parse_tree_path(Some("")).expect("empty input"), TreePath::root());
        assert_eq!(parse_tree_path(Some("/")).expect("bare separator"), TreePath::root());
    }

    #[test]
    fn container_only() {
        let mut expected = TreePath::root();
        expected.cont = Level::Value(cont_id());

        assert_eq!(parse(CONT), expected);
        assert_eq!(parse(&format!("/{CONT}")), expected);
        assert_eq!(parse(&format!("{CONT}/")), expected);
        assert_eq!(parse(&format!("/{CONT}/")), expected);
    }

    #[test]
    fn container_must_be_canonical_uuid() {
        assert_invalid("12345678");
        // Simple (unhyphenated) form is not address syntax.
        assert_invalid("12345678123412341234123456789012");
        assert_invalid("12345678-1234-1234-1234-12345678901x");
        assert_invalid("{12345678-1234-1234-1234-123456789012}");
    }

    #[test]
    fn container_and_object() {
        let mut expected = TreePath::root();
        expected.cont = Level::Value(cont_id());
        expected.oid = Level::Value(ObjectId::new(4321, 1234));

        assert_eq!(parse(&format!("/{CONT}/4321.1234")), expected);
    }

    #[test]
    fn incomplete_object_pair_fails() {
        assert_invalid(&format!("/{CONT}/4321."));
        assert_invalid(&format!("/{CONT}/.1234"));
        assert_invalid(&format!("/{CONT}/4321"));
        assert_invalid(&format!("/{CONT}/4321.12x4"));
    }

    #[test]
    fn full_literal_path() {
        let mut expected = TreePath::root();
        expected.cont = Level::Value(cont_id());
        expected.oid = Level::Value(ObjectId::new(4321, 1234));
        expected.dkey = Level::Value(KeyBuf::from("dkey"));

        assert_eq!(parse(&format!("/{CONT}/4321.1234/dkey")), expected);
        assert_eq!(parse(&format!("/{CONT}/4321.1234/dkey/")), expected);

        expected.akey = Level::Value(KeyBuf::from("akey"));
        assert_eq!(parse(&format!("/{CONT}/4321.1234/dkey/akey")), expected);
        assert_eq!(parse(&format!("/{CONT}/4321.1234/dkey/akey/")), expected);

        // {1-6} is offset 1, length 5: the end is exclusive.
        expected.recx = Level::Value(RecordExtent::new(1, 5));
        assert_eq!(parse(&format!("/{CONT}/4321.1234/dkey/akey/{{1-6}}")), expected);
    }

    #[test]
    fn keys_are_owned_copies() {
        let path = {
            let line = format!("/{CONT}/4321.1234/dkey/akey");
            parse(&line)
            // line dropped here
        };
        assert_eq!(path.dkey.value().map(KeyBuf::as_bytes), Some(&b"dkey"[..]));
        assert_eq!(path.akey.value().map(KeyBuf::as_bytes), Some(&b"akey"[..]));
    }

    #[test]
    fn malformed_extents_fail() {
        let prefix = format!("/{CONT}/4321.1234/dkey/akey");
        assert_invalid(&format!("{prefix}/{{6-1}}"));
        assert_invalid(&format!("{prefix}/{{1-1}}"));
        assert_invalid(&format!("{prefix}/{{1-x}}"));
        assert_invalid(&format!("{prefix}/{{1-6"));
        assert_invalid(&format!("{prefix}/1-6"));
        assert_invalid(&format!("{prefix}/{{-6}}"));
    }

    #[test]
    fn index_addressing() {
        let mut expected = TreePath::root();
        expected.cont = Level::Index(1);
        assert_eq!(parse("[1]"), expected);

        expected.cont = Level::Index(11);
        assert_eq!(parse("[11]"), expected);

        expected.cont = Level::Index(1234);
        assert_eq!(parse("[1234]"), expected);

        expected.cont = Level::Index(1);
        expected.oid = Level::Index(2);
        expected.dkey = Level::Index(3);
        expected.akey = Level::Index(4);
        expected.recx = Level::Index(5);
        assert_eq!(parse("[1]/[2]/[3]/[4]/[5]"), expected);
    }

    #[test]
    fn literal_and_index_levels_can_mix() {
        let mut expected = TreePath::root();
        expected.cont = Level::Value(cont_id());
        expected.oid = Level::Index(2);
        assert_eq!(parse(&format!("/{CONT}/[2]")), expected);
    }

    #[test]
    fn malformed_index_segments_fail() {
        assert_invalid("[]");
        assert_invalid("[1");
        assert_invalid("[x]");
        assert_invalid("[1]z");
        assert_invalid("[-1]");
        // u32 overflow
        assert_invalid("[4294967296]");
    }

    #[test]
    fn numeric_overflow_fails() {
        // u64::MAX + 1 in the object pair
        assert_invalid(&format!("/{CONT}/18446744073709551616.1"));
        let prefix = format!("/{CONT}/4321.1234/dkey/akey");
        assert_invalid(&format!("{prefix}/{{1-18446744073709551616}}"));
    }

    #[test]
    fn too_many_segments_fail() {
        assert_invalid("[1]/[2]/[3]/[4]/[5]/[6]");
    }

    #[test]
    fn repeated_parses_are_identical() {
        let input = format!("/{CONT}/4321.1234/dkey/akey/{{1-6}}");
        assert_eq!(parse(&input), parse(&input));
    }
}
