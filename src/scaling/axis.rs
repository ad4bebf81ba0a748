use std::fmt;

/// A direction along which the single-track mesh is rescaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// along the deposit track (y)
    Length,
    /// across the deposit track (x)
    Width,
    /// through the plate thickness (z)
    Depth,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Length, Axis::Width, Axis::Depth];

    /// Index of the spatial coordinate (0 = x, 1 = y, 2 = z) this axis controls
    pub const fn component(self) -> usize {
        match self {
            Self::Length => 1,
            Self::Width => 0,
            Self::Depth => 2,
        }
    }

    /// The controlling regions along this axis, in their nominal (ascending) order
    pub fn roles(self) -> &'static [Role] {
        let all: &'static [Role; 13] = &Role::ALL;
        match self {
            Self::Length => &all[0..5],
            Self::Width => &all[5..10],
            Self::Depth => &all[10..13],
        }
    }

    /// The pair of node sets whose minimum coordinates decide whether the nominal order
    /// runs in the positive coordinate direction.
    pub const fn boundary_roles(self) -> [Role; 2] {
        match self {
            Self::Length => [Role::BasePlateLengthLeftMost, Role::BasePlateLengthRightMost],
            Self::Width => [Role::BasePlateWidthLeftMost, Role::BasePlateWidthRightMost],
            Self::Depth => [Role::BasePlateDepthBottom, Role::DepositDepth],
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Length => write!(f, "length"),
            Self::Width => write!(f, "width"),
            Self::Depth => write!(f, "depth"),
        }
    }
}

/// One controlling region of the single-track mesh.
///
/// Each role is identified in the mesh file by a node set with a fixed name, and has a fixed
/// reference dimension (its extent in the reference mesh, in mesh units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    BasePlateLengthLeftMost,
    BasePlateLengthLeft,
    DepositLength,
    BasePlateLengthRight,
    BasePlateLengthRightMost,
    BasePlateWidthLeftMost,
    BasePlateWidthLeft,
    DepositWidth,
    BasePlateWidthRight,
    BasePlateWidthRightMost,
    BasePlateDepthBottom,
    BasePlateDepthTop,
    DepositDepth,
}

impl Role {
    /// Every role, in command line order
    pub const ALL: [Role; 13] = [
        Role::BasePlateLengthLeftMost,
        Role::BasePlateLengthLeft,
        Role::DepositLength,
        Role::BasePlateLengthRight,
        Role::BasePlateLengthRightMost,
        Role::BasePlateWidthLeftMost,
        Role::BasePlateWidthLeft,
        Role::DepositWidth,
        Role::BasePlateWidthRight,
        Role::BasePlateWidthRightMost,
        Role::BasePlateDepthBottom,
        Role::BasePlateDepthTop,
        Role::DepositDepth,
    ];

    /// Position of this role in [`Role::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn axis(self) -> Axis {
        match self {
            Self::BasePlateLengthLeftMost
            | Self::BasePlateLengthLeft
            | Self::DepositLength
            | Self::BasePlateLengthRight
            | Self::BasePlateLengthRightMost => Axis::Length,
            Self::BasePlateWidthLeftMost
            | Self::BasePlateWidthLeft
            | Self::DepositWidth
            | Self::BasePlateWidthRight
            | Self::BasePlateWidthRightMost => Axis::Width,
            Self::BasePlateDepthBottom | Self::BasePlateDepthTop | Self::DepositDepth => {
                Axis::Depth
            }
        }
    }

    /// Name of the node set which tags this region in the mesh file
    pub const fn set_name(self) -> &'static str {
        match self {
            Self::BasePlateLengthLeftMost => "setControllingBasePlateLengthLeftMost",
            Self::BasePlateLengthLeft => "setControllingBasePlateLengthLeft",
            Self::DepositLength => "setControllingDepositLength",
            Self::BasePlateLengthRight => "setControllingBasePlateLengthRight",
            Self::BasePlateLengthRightMost => "setControllingBasePlateLengthRightMost",
            Self::BasePlateWidthLeftMost => "setControllingBasePlateWidthLeftMost",
            Self::BasePlateWidthLeft => "setControllingBasePlateWidthLeft",
            Self::DepositWidth => "setControllingDepositWidth",
            Self::BasePlateWidthRight => "setControllingBasePlateWidthRight",
            Self::BasePlateWidthRightMost => "setControllingBasePlateWidthRightMost",
            Self::BasePlateDepthBottom => "setControllingBasePlateDepthBottom",
            Self::BasePlateDepthTop => "setControllingBasePlateDepthTop",
            Self::DepositDepth => "setControllingDepositDepth",
        }
    }

    /// Extent of this region in the reference mesh
    pub const fn reference_dimension(self) -> f64 {
        match self {
            Self::BasePlateLengthLeftMost | Self::BasePlateLengthRightMost => 3.0,
            Self::BasePlateLengthLeft | Self::BasePlateLengthRight => 2.0,
            Self::DepositLength => 10.0,
            Self::BasePlateWidthLeftMost
            | Self::BasePlateWidthLeft
            | Self::DepositWidth
            | Self::BasePlateWidthRight
            | Self::BasePlateWidthRightMost => 1.0,
            Self::BasePlateDepthBottom => 1.0,
            Self::BasePlateDepthTop => 0.75,
            Self::DepositDepth => 0.5,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::BasePlateLengthLeftMost => "base plate length, left coarse region",
            Self::BasePlateLengthLeft => "base plate length, left fine region",
            Self::DepositLength => "deposit length",
            Self::BasePlateLengthRight => "base plate length, right fine region",
            Self::BasePlateLengthRightMost => "base plate length, right coarse region",
            Self::BasePlateWidthLeftMost => "base plate width, left coarse region",
            Self::BasePlateWidthLeft => "base plate width, left fine region",
            Self::DepositWidth => "deposit width",
            Self::BasePlateWidthRight => "base plate width, right fine region",
            Self::BasePlateWidthRightMost => "base plate width, right coarse region",
            Self::BasePlateDepthBottom => "base plate depth, bottom coarse region",
            Self::BasePlateDepthTop => "base plate depth, top fine region",
            Self::DepositDepth => "deposit depth",
        }
    }
}
