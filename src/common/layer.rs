use serde::{Deserialize, Serialize};

/// An entity's render/physics layer as reported by the transform provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layer(pub i32);

impl Layer {
    /// Resolves against every other layer.
    pub const WILDCARD: Layer = Layer(-1);
    pub const DEFAULT: Layer = Layer(0);
    /// Floors and platforms an upper box may be snapped onto.
    pub const GROUND: Layer = Layer(31);
    /// Never resolves against the wildcard layer.
    pub const ISOLATED: Layer = Layer(100);

    pub fn is_wildcard(self) -> bool {
        self == Layer::WILDCARD
    }

    /// Whether a box on this layer may act as ground for another box.
    pub fn supports_ground_snap(self) -> bool {
        self == Layer::WILDCARD || self == Layer::GROUND
    }

    /// The wildcard and isolated layers never interact, in either order.
    pub fn mutually_exclusive(self, other: Layer) -> bool {
        (self == Layer::WILDCARD && other == Layer::ISOLATED)
            || (self == Layer::ISOLATED && other == Layer::WILDCARD)
    }

    /// Layer ordering for physical resolution of a contact owned by `self`.
    ///
    /// A contact resolves when either side is the wildcard or `other` sits on
    /// the same or a higher layer.
    pub fn permits_resolution_with(self, other: Layer) -> bool {
        self.is_wildcard() || other.is_wildcard() || other >= self
    }
}

impl From<i32> for Layer {
    fn from(value: i32) -> Self {
        Layer(value)
    }
}
