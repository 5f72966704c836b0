use std::fmt;

// ---------------------------------------------------------------------------
// LegId
// ---------------------------------------------------------------------------

/// One of the four leg positions on the creature body.
///
/// The discriminant doubles as the index into per-leg arrays, so the order
/// here is the canonical storage order: FL, FR, BL, BR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LegId {
    FrontLeft = 0,
    FrontRight = 1,
    BackLeft = 2,
    BackRight = 3,
}

impl LegId {
    /// All legs in storage order.
    pub const ALL: [Self; 4] = [
        Self::FrontLeft,
        Self::FrontRight,
        Self::BackLeft,
        Self::BackRight,
    ];

    /// Index into per-leg arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The leg diagonally opposite on the body.
    #[must_use]
    pub const fn diagonal(self) -> Self {
        match self {
            Self::FrontLeft => Self::BackRight,
            Self::FrontRight => Self::BackLeft,
            Self::BackLeft => Self::FrontRight,
            Self::BackRight => Self::FrontLeft,
        }
    }

    /// The diagonal pair this leg belongs to.
    #[must_use]
    pub const fn pair(self) -> DiagonalPair {
        match self {
            Self::FrontLeft | Self::BackRight => DiagonalPair::FrontLeftBackRight,
            Self::FrontRight | Self::BackLeft => DiagonalPair::FrontRightBackLeft,
        }
    }

    #[must_use]
    pub const fn is_front(self) -> bool {
        matches!(self, Self::FrontLeft | Self::FrontRight)
    }

    #[must_use]
    pub const fn is_left(self) -> bool {
        matches!(self, Self::FrontLeft | Self::BackLeft)
    }

    /// Short label used in logs ("FL", "FR", ...).
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::FrontLeft => "FL",
            Self::FrontRight => "FR",
            Self::BackLeft => "BL",
            Self::BackRight => "BR",
        }
    }
}

impl fmt::Display for LegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

// ---------------------------------------------------------------------------
// DiagonalPair
// ---------------------------------------------------------------------------

/// Two legs on opposite body corners that step together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DiagonalPair {
    /// Front-left + back-right. Steps first.
    #[default]
    FrontLeftBackRight,
    /// Front-right + back-left.
    FrontRightBackLeft,
}

impl DiagonalPair {
    /// Both legs of the pair, front leg first.
    #[must_use]
    pub const fn legs(self) -> [LegId; 2] {
        match self {
            Self::FrontLeftBackRight => [LegId::FrontLeft, LegId::BackRight],
            Self::FrontRightBackLeft => [LegId::FrontRight, LegId::BackLeft],
        }
    }

    /// The pair that takes over when this one is done.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::FrontLeftBackRight => Self::FrontRightBackLeft,
            Self::FrontRightBackLeft => Self::FrontLeftBackRight,
        }
    }

    #[must_use]
    pub const fn contains(self, leg: LegId) -> bool {
        matches!(
            (self, leg),
            (Self::FrontLeftBackRight, LegId::FrontLeft | LegId::BackRight)
                | (Self::FrontRightBackLeft, LegId::FrontRight | LegId::BackLeft)
        )
    }
}

impl fmt::Display for DiagonalPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b] = self.legs();
        write!(f, "{a}+{b}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
