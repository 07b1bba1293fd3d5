/// Label of the space bar key.
pub const SPACE: &str = "SPACE";

/// Map a raw key identifier to the label it would match on the layout.
///
/// A literal space becomes [`SPACE`]; everything else is upper-cased. Names of
/// non-printable keys ("Escape", "F1") come out as labels no layout contains,
/// so callers filter them with a membership check.
pub fn normalize(raw: &str) -> String {
    if raw == " " {
        SPACE.to_string()
    } else {
        raw.to_uppercase()
    }
}
