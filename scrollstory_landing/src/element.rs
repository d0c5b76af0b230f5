// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handles for every section and animated element of the landing page.

/// Words in the hero headline, animated one by one by the intro.
pub const HERO_WORDS: u8 = 4;
/// Trust badges under the hero search box.
pub const HERO_BADGES: u8 = 3;
/// Numbered steps in "how it works".
pub const HOW_STEPS: u8 = 3;
/// Instrument category cards.
pub const INSTRUMENT_CARDS: u8 = 4;
/// Value propositions in "for teachers".
pub const TEACHER_PROPS: u8 = 4;
/// Featured teacher cards (the page requests six).
pub const FEATURED_CARDS: u8 = 6;
/// Pricing plan cards.
pub const PRICING_CARDS: u8 = 3;
/// City cards.
pub const CITY_CARDS: u8 = 8;
/// Lines of the final call to action.
pub const FINAL_LINES: u8 = 3;

/// A section or animatable element of the landing page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    /// Pinned hero section.
    Hero,
    /// Hero photo, left.
    HeroPhotoA,
    /// Hero photo, top right.
    HeroPhotoB,
    /// Hero photo, bottom right.
    HeroPhotoC,
    /// Hero headline block.
    HeroText,
    /// One word of the hero headline.
    HeroWord(u8),
    /// Hero search box.
    HeroSearch,
    /// One hero trust badge.
    HeroBadge(u8),

    /// Pinned "how it works" section.
    HowItWorks,
    /// "How it works" photo.
    HowPhoto,
    /// "How it works" headline.
    HowHeadline,
    /// Container of the steps.
    HowSteps,
    /// One step.
    HowStep(u8),
    /// Container of the large background numbers.
    HowNumbers,
    /// One large background number.
    HowNumber(u8),

    /// Pinned instruments section.
    Instruments,
    /// Instruments headline.
    InstrumentsHeadline,
    /// One instrument card.
    InstrumentCard(u8),

    /// Featured teachers section (normal flow).
    Featured,
    /// Featured teachers headline.
    FeaturedHeadline,
    /// Container of the featured teacher cards.
    FeaturedCards,
    /// One featured teacher card.
    FeaturedCard(u8),

    /// Pinned "for teachers" section.
    ForTeachers,
    /// "For teachers" photo.
    ForTeachersPhoto,
    /// "For teachers" copy.
    ForTeachersContent,
    /// Container of the value propositions.
    ForTeachersProps,
    /// One value proposition.
    ForTeachersProp(u8),

    /// Pricing section (normal flow).
    Pricing,
    /// Pricing headline.
    PricingHeadline,
    /// Container of the plan cards.
    PricingCards,
    /// One plan card.
    PricingCard(u8),
    /// Fine print under the plans.
    PricingInfo,

    /// Pinned testimonials section.
    Testimonials,
    /// Testimonial photo.
    TestimonialPhoto,
    /// Testimonial quote.
    TestimonialQuote,

    /// Cities section (normal flow).
    Cities,
    /// Cities headline.
    CitiesHeadline,
    /// Container of the city cards.
    CityCards,
    /// One city card.
    CityCard(u8),

    /// Final call-to-action section (normal flow).
    FinalCta,
    /// Call-to-action button block.
    FinalCtaButton,
    /// Container of the closing copy.
    FinalContent,
    /// One line of closing copy.
    FinalLine(u8),
}

impl Element {
    /// The pinned sections, in document order.
    pub const PINNED: [Self; 5] = [
        Self::Hero,
        Self::HowItWorks,
        Self::Instruments,
        Self::ForTeachers,
        Self::Testimonials,
    ];

    /// Every top-level section, in document order.
    pub const SECTIONS: [Self; 9] = [
        Self::Hero,
        Self::HowItWorks,
        Self::Instruments,
        Self::Featured,
        Self::ForTeachers,
        Self::Pricing,
        Self::Testimonials,
        Self::Cities,
        Self::FinalCta,
    ];

    /// Returns `true` for the pinned sections.
    #[must_use]
    pub fn is_pinned_section(self) -> bool {
        Self::PINNED.contains(&self)
    }
}

/// `Element::$variant(0..count)`.
pub(crate) fn indexed(variant: fn(u8) -> Element, count: u8) -> impl Iterator<Item = Element> {
    (0..count).map(variant)
}
