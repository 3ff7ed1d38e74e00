/// Outcome of a primitive or of a whole table run.
///
/// On acceptance `position` is the point just after the consumed tokens (equal
/// to the input position for zero-width matches). On rejection it is whatever
/// the failing primitive reported, usually the upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult<C> {
    pub accepted: bool,
    pub position: C,
}

impl<C> MatchResult<C> {
    pub fn accept(position: C) -> Self {
        Self {
            accepted: true,
            position,
        }
    }

    pub fn reject(position: C) -> Self {
        Self {
            accepted: false,
            position,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn into_parts(self) -> (bool, C) {
        (self.accepted, self.position)
    }
}

impl<C> From<MatchResult<C>> for (bool, C) {
    fn from(result: MatchResult<C>) -> Self {
        result.into_parts()
    }
}
