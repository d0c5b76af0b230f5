// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolved per-element visual state.

use kurbo::{Affine, Vec2};

/// An animatable property of an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Property {
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Horizontal offset from the element's laid-out position.
    X,
    /// Vertical offset from the element's laid-out position.
    Y,
    /// Uniform scale about the element's origin.
    Scale,
}

bitflags::bitflags! {
    /// A set of [`Property`] values.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Properties: u8 {
        /// [`Property::Opacity`].
        const OPACITY = 1 << 0;
        /// [`Property::X`].
        const X = 1 << 1;
        /// [`Property::Y`].
        const Y = 1 << 2;
        /// [`Property::Scale`].
        const SCALE = 1 << 3;
    }
}

impl Property {
    /// All properties, in a stable order.
    pub const ALL: [Self; 4] = [Self::Opacity, Self::X, Self::Y, Self::Scale];

    /// The single-bit set for this property.
    #[must_use]
    pub const fn flag(self) -> Properties {
        match self {
            Self::Opacity => Properties::OPACITY,
            Self::X => Properties::X,
            Self::Y => Properties::Y,
            Self::Scale => Properties::SCALE,
        }
    }
}

/// The visual state of one element at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Visual {
    /// Translation from the laid-out position.
    pub offset: Vec2,
    /// Uniform scale.
    pub scale: f64,
    /// Opacity.
    pub opacity: f64,
}

impl Default for Visual {
    fn default() -> Self {
        Self::SETTLED
    }
}

impl Visual {
    /// Fully visible at the laid-out position: the safe resting state.
    pub const SETTLED: Self = Self {
        offset: Vec2::ZERO,
        scale: 1.0,
        opacity: 1.0,
    };

    /// Reads one property.
    #[must_use]
    pub fn get(&self, property: Property) -> f64 {
        match property {
            Property::Opacity => self.opacity,
            Property::X => self.offset.x,
            Property::Y => self.offset.y,
            Property::Scale => self.scale,
        }
    }

    /// Writes one property.
    pub fn set(&mut self, property: Property, value: f64) {
        match property {
            Property::Opacity => self.opacity = value,
            Property::X => self.offset.x = value,
            Property::Y => self.offset.y = value,
            Property::Scale => self.scale = value,
        }
    }

    /// Translation followed by scale, as an affine transform.
    #[must_use]
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Returns `true` if the element is fully transparent.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.opacity <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_round_trip() {
        let mut v = Visual::SETTLED;
        v.set(Property::X, -12.0);
        v.set(Property::Y, 4.0);
        v.set(Property::Scale, 0.96);
        v.set(Property::Opacity, 0.5);
        assert_eq!(v.get(Property::X), -12.0);
        assert_eq!(v.offset, Vec2::new(-12.0, 4.0));
        assert_eq!(v.get(Property::Scale), 0.96);
        assert_eq!(v.get(Property::Opacity), 0.5);
    }

    #[test]
    fn settled_transform_is_identity() {
        assert_eq!(Visual::SETTLED.transform(), Affine::IDENTITY);
        assert!(!Visual::SETTLED.is_hidden());
    }

    #[test]
    fn flags_are_distinct() {
        let all = Property::ALL
            .iter()
            .fold(Properties::empty(), |acc, p| acc | p.flag());
        assert_eq!(all, Properties::all());
    }
}
