/// One of the two layout axes.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    #[default]
    Y,
}

impl Axis {
    /// Both axes, in the order layout processes them.
    pub const ALL: [Self; 2] = [Self::X, Self::Y];

    /// Array index for per-axis storage.
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
        }
    }

    /// The perpendicular axis.
    pub fn cross(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_is_involution() {
        for axis in Axis::ALL {
            assert_eq!(axis.cross().cross(), axis);
            assert_ne!(axis.cross(), axis);
        }
        assert_eq!(Axis::X.index(), 0);
        assert_eq!(Axis::Y.index(), 1);
    }
}
