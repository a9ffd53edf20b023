//! Pure corrective-action selection.
//!
//! The selectors map existence facts and the overwrite policy to exactly
//! one corrective action. They perform no I/O, so the decision tables are
//! testable in isolation from any client.

/// Corrective action for a `present` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentAction {
    /// The page is missing; create it.
    Create,
    /// The page exists and may be rewritten; update it in place.
    Update,
    /// The page exists and must be left alone.
    NoOpExists,
}

/// Corrective action for an `absent` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsentAction {
    /// The page exists; delete it.
    Delete,
    /// The page is already absent.
    NoOpAbsent,
}

/// Decision table for `present`, first matching row wins:
///
/// | exists | overwrite | action     |
/// |--------|-----------|------------|
/// | false  | any       | Create     |
/// | true   | false     | NoOpExists |
/// | true   | true      | Update     |
#[must_use]
pub fn select_present(exists: bool, overwrite: bool) -> PresentAction {
    match (exists, overwrite) {
        (false, _) => PresentAction::Create,
        (true, false) => PresentAction::NoOpExists,
        (true, true) => PresentAction::Update,
    }
}

/// Decision table for `absent`: delete only what exists.
#[must_use]
pub fn select_absent(exists: bool) -> AbsentAction {
    if exists {
        AbsentAction::Delete
    } else {
        AbsentAction::NoOpAbsent
    }
}
