// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The landing page choreography.
//!
//! Pinned sections run entrance (0-30%), settle (30-70%) and exit (70-100%)
//! against their pinned scroll band. The hero is already on screen when the
//! page loads, so it only has an exit; its entrance is a time-driven intro.
//! Sections in normal flow reveal their content with unpinned scrubbed
//! triggers.

use scrollstory_pin::AnimationHost;
use scrollstory_progress::{Anchor, Scrub};
use scrollstory_stage::Stage;
use scrollstory_timeline::{Easing, Property, Timeline, TimelineError, Track, Value};

use crate::element::{
    indexed, Element, CITY_CARDS, FEATURED_CARDS, FINAL_LINES, HERO_BADGES, HERO_WORDS,
    HOW_STEPS, INSTRUMENT_CARDS, PRICING_CARDS, TEACHER_PROPS,
};

use Element::*;
use Property::{Opacity, Scale, X, Y};
use Value::{Vh, Vw};

/// Length of the hero intro, in seconds.
pub const HERO_INTRO_SECONDS: f64 = 2.21;

const EXIT: Easing = Easing::PowerIn(2);
const INTRO: Easing = Easing::PowerOut(3);

/// An unpinned scrubbed reveal of the page.
#[derive(Clone, Debug)]
pub struct RevealSpec {
    /// Element whose top is tracked.
    pub trigger: Element,
    /// Animation played across the trigger span.
    pub timeline: Timeline<Element>,
    /// Viewport anchor where the reveal starts.
    pub start: Anchor,
    /// Viewport anchor where the reveal completes.
    pub end: Anchor,
}

/// Track over `targets` staggered so the last one ends at the end of its
/// phase, keeping the `duration : stagger` ratio.
fn staggered(
    targets: impl IntoIterator<Item = Element>,
    delay: f64,
    duration: f64,
    stagger: f64,
) -> Track<Element> {
    let track = Track::new(targets);
    let last = track.targets().len().saturating_sub(1) as f64;
    let extent = (duration + stagger * last) / (1.0 - delay);
    track
        .delay(delay)
        .duration(duration / extent)
        .stagger(stagger / extent)
}

/// Scroll timeline of the hero: exit only.
pub fn hero() -> Result<Timeline<Element>, TimelineError> {
    Timeline::builder()
        .exit(
            Track::new([HeroPhotoA])
                .tween(X, 0.0, Vw(-18.0))
                .tween(Opacity, 1.0, 0.0)
                .easing(EXIT),
        )
        .exit(
            Track::new([HeroPhotoB])
                .tween(Y, 0.0, Vh(-10.0))
                .tween(Scale, 1.0, 0.98)
                .tween(Opacity, 1.0, 0.0)
                .easing(EXIT),
        )
        .exit(
            Track::new([HeroPhotoC])
                .tween(Y, 0.0, Vh(18.0))
                .tween(Opacity, 1.0, 0.0)
                .easing(EXIT),
        )
        .exit(
            Track::new([HeroText])
                .tween(X, 0.0, Vw(8.0))
                .tween(Opacity, 1.0, 0.0)
                .easing(EXIT),
        )
        .exit(
            Track::new([HeroSearch])
                .tween(Y, 0.0, Vh(18.0))
                .tween(Scale, 1.0, 0.98)
                .tween(Opacity, 1.0, 0.0)
                .easing(EXIT),
        )
        .exit(
            Track::new(indexed(HeroBadge, HERO_BADGES))
                .tween(Opacity, 1.0, 0.0)
                .easing(EXIT)
                .delay(1.0 / 6.0)
                .duration(5.0 / 6.0),
        )
        .build()
}

/// Time-driven hero intro, played once over [`HERO_INTRO_SECONDS`].
pub fn hero_intro() -> Result<Timeline<Element>, TimelineError> {
    let s = |seconds: f64| seconds / HERO_INTRO_SECONDS;
    Timeline::builder()
        .split(1.0, 1.0)
        .entrance(
            Track::new([HeroPhotoA])
                .tween(X, Vw(-12.0), 0.0)
                .tween(Opacity, 0.0, 1.0)
                .easing(INTRO)
                .duration(s(0.9)),
        )
        .entrance(
            Track::new([HeroPhotoB])
                .tween(X, Vw(12.0), 0.0)
                .tween(Scale, 1.06, 1.0)
                .tween(Opacity, 0.0, 1.0)
                .easing(INTRO)
                .delay(s(0.2))
                .duration(s(1.0)),
        )
        .entrance(
            Track::new([HeroPhotoC])
                .tween(Y, Vh(12.0), 0.0)
                .tween(Opacity, 0.0, 1.0)
                .easing(INTRO)
                .delay(s(0.5))
                .duration(s(0.9)),
        )
        .entrance(
            Track::new(indexed(HeroWord, HERO_WORDS))
                .tween(Y, 24.0, 0.0)
                .tween(Opacity, 0.0, 1.0)
                .easing(INTRO)
                .delay(s(0.9))
                .stagger(s(0.05))
                .duration(s(0.6)),
        )
        .entrance(
            Track::new([HeroSearch])
                .tween(Y, Vh(10.0), 0.0)
                .tween(Scale, 0.96, 1.0)
                .tween(Opacity, 0.0, 1.0)
                .easing(Easing::BackOut(1.4))
                .delay(s(1.25))
                .duration(s(0.8)),
        )
        .entrance(
            Track::new(indexed(HeroBadge, HERO_BADGES))
                .tween(Scale, 0.8, 1.0)
                .tween(Opacity, 0.0, 1.0)
                .easing(INTRO)
                .delay(s(1.55))
                .stagger(s(0.08))
                .duration(s(0.5)),
        )
        .build()
}

/// Scroll timeline of "how it works".
pub fn how_it_works() -> Result<Timeline<Element>, TimelineError> {
    Timeline::builder()
        .entrance(
            Track::new([HowPhoto])
                .tween(X, Vw(-55.0), 0.0)
                .tween(Opacity, 0.0, 1.0)
                .tween(Scale, 0.96, 1.0),
        )
        .entrance(
            Track::new([HowHeadline])
                .tween(X, Vw(10.0), 0.0)
                .tween(Opacity, 0.0, 1.0),
        )
        .entrance(
            staggered(indexed(HowStep, HOW_STEPS), 1.0 / 6.0, 0.5, 0.08)
                .tween(X, Vw(18.0), 0.0)
                .tween(Opacity, 0.0, 1.0),
        )
        .entrance(
            staggered(indexed(HowNumber, HOW_STEPS), 1.0 / 6.0, 0.5, 0.05)
                .tween(Scale, 0.9, 1.0)
                .tween(Opacity, 0.0, 0.08),
        )
        .exit(
            Track::new([HowPhoto])
                .tween(X, 0.0, Vw(-18.0))
                .tween(Opacity, 1.0, 0.0)
                .easing(EXIT),
        )
        .exit(
            Track::new([HowHeadline, HowSteps])
                .tween(X, 0.0, Vw(10.0))
                .tween(Opacity, 1.0, 0.0)
                .easing(EXIT),
        )
        .exit(
            Track::new([HowNumbers])
                .tween(Opacity, 0.08, 0.0)
                .easing(EXIT)
                .delay(1.0 / 6.0)
                .duration(5.0 / 6.0),
        )
        .build()
}

/// Scroll timeline of the instruments grid.
pub fn instruments() -> Result<Timeline<Element>, TimelineError> {
    Timeline::builder()
        .entrance(
            Track::new([InstrumentsHeadline])
                .tween(Y, Vh(-8.0), 0.0)
                .tween(Opacity, 0.0, 1.0),
        )
        .entrance(
            staggered(indexed(InstrumentCard, INSTRUMENT_CARDS), 1.0 / 6.0, 0.5, 0.08)
                .tween(Y, Vh(60.0), 0.0)
                .tween(Opacity, 0.0, 1.0)
                .tween(Scale, 0.98, 1.0),
        )
        .exit(
            staggered(indexed(InstrumentCard, INSTRUMENT_CARDS), 0.0, 0.5, 0.03)
                .tween(Y, 0.0, Vh(-18.0))
                .tween(Opacity, 1.0, 0.0)
                .easing(EXIT),
        )
        .exit(
            Track::new([InstrumentsHeadline])
                .tween(Y, 0.0, Vh(-6.0))
                .tween(Opacity, 1.0, 0.0)
                .easing(EXIT),
        )
        .build()
}

/// Scroll timeline of "for teachers".
pub fn for_teachers() -> Result<Timeline<Element>, TimelineError> {
    Timeline::builder()
        .entrance(
            Track::new([ForTeachersPhoto])
                .tween(X, Vw(55.0), 0.0)
                .tween(Opacity, 0.0, 1.0)
                .tween(Scale, 0.97, 1.0),
        )
        .entrance(
            Track::new([ForTeachersContent])
                .tween(X, Vw(-10.0), 0.0)
                .tween(Opacity, 0.0, 1.0),
        )
        .entrance(
            staggered(indexed(ForTeachersProp, TEACHER_PROPS), 1.0 / 3.0, 0.5, 0.1)
                .tween(Y, Vh(6.0), 0.0)
                .tween(Opacity, 0.0, 1.0),
        )
        .exit(
            Track::new([ForTeachersPhoto])
                .tween(X, 0.0, Vw(18.0))
                .tween(Opacity, 1.0, 0.0)
                .easing(EXIT),
        )
        .exit(
            Track::new([ForTeachersContent, ForTeachersProps])
                .tween(X, 0.0, Vw(-10.0))
                .tween(Opacity, 1.0, 0.0)
                .easing(EXIT),
        )
        .build()
}

/// Scroll timeline of the testimonials.
pub fn testimonials() -> Result<Timeline<Element>, TimelineError> {
    Timeline::builder()
        .entrance(
            Track::new([TestimonialPhoto])
                .tween(X, Vw(55.0), 0.0)
                .tween(Opacity, 0.0, 1.0)
                .tween(Scale, 0.97, 1.0),
        )
        .entrance(
            Track::new([TestimonialQuote])
                .tween(X, Vw(-12.0), 0.0)
                .tween(Opacity, 0.0, 1.0),
        )
        .exit(
            Track::new([TestimonialPhoto])
                .tween(X, 0.0, Vw(18.0))
                .tween(Opacity, 1.0, 0.0)
                .easing(EXIT),
        )
        .exit(
            Track::new([TestimonialQuote])
                .tween(X, 0.0, Vw(-10.0))
                .tween(Opacity, 1.0, 0.0)
                .easing(EXIT),
        )
        .build()
}

/// Single-phase reveal timeline.
fn reveal(track: Track<Element>) -> Result<Timeline<Element>, TimelineError> {
    Timeline::builder().split(1.0, 1.0).entrance(track).build()
}

fn headline(trigger: Element) -> Result<RevealSpec, TimelineError> {
    Ok(RevealSpec {
        trigger,
        timeline: reveal(
            Track::new([trigger])
                .tween(Y, 24.0, 0.0)
                .tween(Opacity, 0.0, 1.0),
        )?,
        start: Anchor(0.8),
        end: Anchor(0.55),
    })
}

fn cards(
    trigger: Element,
    cards: impl IntoIterator<Item = Element>,
    rise: f64,
    stagger: f64,
) -> Result<RevealSpec, TimelineError> {
    Ok(RevealSpec {
        trigger,
        timeline: reveal(
            staggered(cards, 0.0, 0.5, stagger)
                .tween(Y, rise, 0.0)
                .tween(Opacity, 0.0, 1.0)
                .tween(Scale, 0.98, 1.0),
        )?,
        start: Anchor(0.8),
        end: Anchor(0.5),
    })
}

/// Reveals of the featured teachers section.
pub fn featured() -> Result<Vec<RevealSpec>, TimelineError> {
    Ok(vec![
        headline(FeaturedHeadline)?,
        cards(FeaturedCards, indexed(FeaturedCard, FEATURED_CARDS), 40.0, 0.1)?,
    ])
}

/// Reveals of the pricing section.
pub fn pricing() -> Result<Vec<RevealSpec>, TimelineError> {
    Ok(vec![
        headline(PricingHeadline)?,
        cards(PricingCards, indexed(PricingCard, PRICING_CARDS), 60.0, 0.12)?,
        RevealSpec {
            trigger: PricingInfo,
            timeline: reveal(
                Track::new([PricingInfo])
                    .tween(Y, 30.0, 0.0)
                    .tween(Opacity, 0.0, 1.0),
            )?,
            start: Anchor(0.85),
            end: Anchor(0.65),
        },
    ])
}

/// Reveals of the cities section.
pub fn cities() -> Result<Vec<RevealSpec>, TimelineError> {
    Ok(vec![
        headline(CitiesHeadline)?,
        cards(CityCards, indexed(CityCard, CITY_CARDS), 40.0, 0.08)?,
    ])
}

/// Reveals of the final call to action.
pub fn final_cta() -> Result<Vec<RevealSpec>, TimelineError> {
    Ok(vec![
        RevealSpec {
            trigger: FinalCtaButton,
            timeline: reveal(
                Track::new([FinalCtaButton])
                    .tween(Y, Vh(6.0), 0.0)
                    .tween(Opacity, 0.0, 1.0),
            )?,
            start: Anchor(0.85),
            end: Anchor(0.6),
        },
        RevealSpec {
            trigger: FinalContent,
            timeline: reveal(
                staggered(indexed(FinalLine, FINAL_LINES), 0.0, 0.5, 0.1)
                    .tween(Y, 18.0, 0.0)
                    .tween(Opacity, 0.0, 1.0),
            )?,
            start: Anchor(0.8),
            end: Anchor(0.55),
        },
    ])
}

/// Adds the whole landing page to `stage`, in document order.
///
/// Pinned sections scrub with the stage's pin configuration; reveals follow
/// scroll immediately.
pub fn compose<H: AnimationHost<Element>>(
    stage: &mut Stage<Element, H>,
) -> Result<(), TimelineError> {
    stage.add_section(Hero, hero()?);
    stage.add_intro(hero_intro()?, HERO_INTRO_SECONDS);
    stage.add_section(HowItWorks, how_it_works()?);
    stage.add_section(Instruments, instruments()?);
    add_reveals(stage, featured()?);
    stage.add_section(ForTeachers, for_teachers()?);
    add_reveals(stage, pricing()?);
    stage.add_section(Testimonials, testimonials()?);
    add_reveals(stage, cities()?);
    add_reveals(stage, final_cta()?);
    tracing::debug!(
        pinned = stage.sections().len(),
        reveals = stage.reveals().len(),
        "landing page composed"
    );
    Ok(())
}

fn add_reveals<H: AnimationHost<Element>>(stage: &mut Stage<Element, H>, reveals: Vec<RevealSpec>) {
    for r in reveals {
        stage.add_reveal(r.trigger, r.timeline, r.start, r.end, Scrub::Immediate);
    }
}
