// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A headless host that lays the page out as stacked blocks and records
//! everything the engine asks of it.

use hashbrown::HashMap;
use kurbo::{Rect, Size};
use scrollstory_pin::{AnimationHost, PinState};
use scrollstory_timeline::Visual;

use crate::element::Element;
use crate::LayoutConfig;

/// Headless [`AnimationHost`] for the landing page.
///
/// Sections are stacked top to bottom in document order. Pinned sections are
/// one viewport tall; reserving scroll for a section pushes everything after
/// it down by the reserved extent.
#[derive(Clone, Debug)]
pub struct RecordingHost {
    viewport: Size,
    natural: HashMap<Element, Rect>,
    natural_height: f64,
    reserved: HashMap<Element, f64>,
    pins: HashMap<Element, PinState>,
    visuals: HashMap<Element, Visual>,
    pin_log: Vec<(Element, PinState)>,
    applied: usize,
}

impl RecordingHost {
    /// Lays the page out for `viewport`.
    #[must_use]
    pub fn new(viewport: Size, layout: &LayoutConfig) -> Self {
        let mut host = Self {
            viewport,
            natural: HashMap::new(),
            natural_height: 0.0,
            reserved: HashMap::new(),
            pins: HashMap::new(),
            visuals: HashMap::new(),
            pin_log: Vec::new(),
            applied: 0,
        };
        host.lay_out(viewport, layout);
        host
    }

    /// Re-lays the page out for a new viewport. Reservations are kept until
    /// the sections re-register.
    pub fn resize(&mut self, viewport: Size, layout: &LayoutConfig) {
        self.lay_out(viewport, layout);
    }

    fn lay_out(&mut self, viewport: Size, layout: &LayoutConfig) {
        use Element::*;

        self.viewport = viewport;
        self.natural.clear();
        let width = viewport.width;
        let mut top = 0.0;
        for section in Element::SECTIONS {
            let height = match section {
                Featured => layout.featured,
                Pricing => layout.pricing,
                Cities => layout.cities,
                FinalCta => layout.final_cta,
                _ => viewport.height,
            };
            let mut place = |element: Element, offset: f64, h: f64| {
                let y = top + offset;
                self.natural.insert(element, Rect::new(0.0, y, width, y + h));
            };
            place(section, 0.0, height);
            match section {
                Featured => {
                    place(FeaturedHeadline, 96.0, 120.0);
                    place(FeaturedCards, 280.0, (height - 380.0).max(1.0));
                }
                Pricing => {
                    place(PricingHeadline, 96.0, 120.0);
                    place(PricingCards, 280.0, (height - 580.0).max(1.0));
                    place(PricingInfo, (height - 220.0).max(0.0), 120.0);
                }
                Cities => {
                    place(CitiesHeadline, 96.0, 120.0);
                    place(CityCards, 280.0, (height - 380.0).max(1.0));
                }
                FinalCta => {
                    place(FinalCtaButton, 120.0, 200.0);
                    place(FinalContent, 380.0, 200.0);
                }
                _ => {}
            }
            top += height;
        }
        self.natural_height = top;
    }

    /// The current viewport.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Document height including every reserved scroll band.
    #[must_use]
    pub fn document_height(&self) -> f64 {
        self.natural_height + self.reserved.values().sum::<f64>()
    }

    /// Largest scroll offset.
    #[must_use]
    pub fn max_scroll(&self) -> f64 {
        (self.document_height() - self.viewport.height).max(0.0)
    }

    /// Removes `element` from layout, as if it were not rendered.
    pub fn remove(&mut self, element: Element) {
        self.natural.remove(&element);
    }

    /// Puts `element` at `rect` in natural (unshifted) document coordinates.
    pub fn place(&mut self, element: Element, rect: Rect) {
        self.natural.insert(element, rect);
    }

    /// Last visual applied to `element`, or the settled state if the engine
    /// never touched it.
    #[must_use]
    pub fn visual(&self, element: Element) -> Visual {
        self.visuals.get(&element).copied().unwrap_or(Visual::SETTLED)
    }

    /// Current pin state of `section`, if it was ever reported.
    #[must_use]
    pub fn pin_state(&self, section: Element) -> Option<PinState> {
        self.pins.get(&section).copied()
    }

    /// Scroll extent reserved for `section`.
    #[must_use]
    pub fn reserved(&self, section: Element) -> Option<f64> {
        self.reserved.get(&section).copied()
    }

    /// Every pin transition, in order.
    #[must_use]
    pub fn pin_log(&self) -> &[(Element, PinState)] {
        &self.pin_log
    }

    /// Number of visuals applied so far.
    #[must_use]
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Returns `true` if no section holds a reservation or a pin.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.reserved.is_empty()
            && self
                .pins
                .values()
                .all(|state| *state == PinState::Before)
    }
}

impl AnimationHost<Element> for RecordingHost {
    fn measure(&self, element: Element) -> Option<Rect> {
        let rect = *self.natural.get(&element)?;
        let shift: f64 = self
            .reserved
            .iter()
            .filter(|(section, _)| {
                self.natural
                    .get(*section)
                    .is_some_and(|r| r.y0 < rect.y0)
            })
            .map(|(_, extent)| extent)
            .sum();
        Some(rect + kurbo::Vec2::new(0.0, shift))
    }

    fn set_pin(&mut self, section: Element, state: PinState) {
        self.pins.insert(section, state);
        self.pin_log.push((section, state));
    }

    fn reserve_scroll(&mut self, section: Element, extent: f64) {
        self.reserved.insert(section, extent);
    }

    fn release_scroll(&mut self, section: Element) {
        self.reserved.remove(&section);
    }

    fn apply(&mut self, element: Element, visual: &Visual) {
        self.visuals.insert(element, *visual);
        self.applied += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(1440.0, 900.0);

    #[test]
    fn sections_stack_in_document_order() {
        let host = RecordingHost::new(VIEWPORT, &LayoutConfig::default());
        let tops: Vec<f64> = Element::SECTIONS
            .iter()
            .map(|s| host.measure(*s).unwrap().y0)
            .collect();
        assert_eq!(
            tops,
            [0.0, 900.0, 1800.0, 2700.0, 3800.0, 4700.0, 6000.0, 6900.0, 7800.0]
        );
        assert_eq!(host.document_height(), 8500.0);
        assert_eq!(host.max_scroll(), 7600.0);
    }

    #[test]
    fn reservations_push_later_content_down() {
        let mut host = RecordingHost::new(VIEWPORT, &LayoutConfig::default());
        host.reserve_scroll(Element::HowItWorks, 1170.0);
        assert_eq!(host.measure(Element::Hero).unwrap().y0, 0.0);
        assert_eq!(host.measure(Element::HowItWorks).unwrap().y0, 900.0);
        assert_eq!(host.measure(Element::Instruments).unwrap().y0, 2970.0);
        assert_eq!(host.measure(Element::FeaturedHeadline).unwrap().y0, 3966.0);
        assert_eq!(host.max_scroll(), 8770.0);

        host.release_scroll(Element::HowItWorks);
        assert_eq!(host.measure(Element::Instruments).unwrap().y0, 1800.0);
    }

    #[test]
    fn records_pins_and_visuals() {
        let mut host = RecordingHost::new(VIEWPORT, &LayoutConfig::default());
        assert_eq!(host.visual(Element::HowPhoto), Visual::SETTLED);
        let hidden = Visual {
            opacity: 0.0,
            ..Visual::SETTLED
        };
        host.apply(Element::HowPhoto, &hidden);
        host.set_pin(Element::HowItWorks, PinState::Pinned);
        assert_eq!(host.visual(Element::HowPhoto), hidden);
        assert_eq!(host.pin_state(Element::HowItWorks), Some(PinState::Pinned));
        assert!(!host.is_released());
        host.set_pin(Element::HowItWorks, PinState::Before);
        assert!(host.is_released());
        assert_eq!(host.pin_log().len(), 2);
        assert_eq!(host.applied(), 1);
    }

    #[test]
    fn removed_elements_do_not_measure() {
        let mut host = RecordingHost::new(VIEWPORT, &LayoutConfig::default());
        host.remove(Element::Instruments);
        assert_eq!(host.measure(Element::Instruments), None);
    }
}
