//! Range-band selection helpers.
//!
//! The calculator lets the player pick a bracket (or how far inside minimum
//! range the target sits) instead of typing a hex count. These helpers turn
//! such a pick into a concrete range so the engine scores it like any other.

use crate::constants::MAX_INSIDE_MIN_RANGE_OFFSET;
use crate::gator::classify_range;
use crate::result::RangeBracket;
use crate::state::AttackContext;

impl AttackContext {
    /// Hexes the current range sits inside the weapon's minimum range.
    #[must_use]
    pub const fn inside_minimum(&self) -> u32 {
        self.weapon_min_range.saturating_sub(self.range_hexes)
    }

    #[must_use]
    pub fn bracket(&self) -> RangeBracket {
        classify_range(self).0
    }

    /// Representative range for a bracket: the nearest hex inside it.
    ///
    /// Picking short keeps the current inside-minimum offset so the
    /// minimum-range penalty survives a round trip through another bracket.
    #[must_use]
    pub fn range_for_bracket(&self, bracket: RangeBracket) -> u32 {
        let brackets = &self.weapon_brackets;
        match bracket {
            RangeBracket::Short => self
                .weapon_min_range
                .saturating_sub(self.inside_minimum())
                .max(1),
            RangeBracket::Medium => brackets.short_max.saturating_add(1),
            RangeBracket::Long => brackets.medium_max.saturating_add(1),
            RangeBracket::Beyond => brackets.long_max.saturating_add(1),
        }
    }

    pub fn select_bracket(&mut self, bracket: RangeBracket) {
        self.range_hexes = self.range_for_bracket(bracket);
    }

    /// Offsets (in hexes inside minimum range) the player may choose from.
    /// Zero means "at minimum range".
    #[must_use]
    pub fn inside_minimum_options(&self) -> Vec<u32> {
        let deepest = self
            .weapon_min_range
            .saturating_sub(1)
            .min(MAX_INSIDE_MIN_RANGE_OFFSET);
        (0..=deepest).collect()
    }

    /// Place the target `offset` hexes inside minimum range.
    ///
    /// Only allowed while the shot is at short range; returns the new range,
    /// or `None` when the pick was ignored.
    pub fn select_inside_minimum(&mut self, offset: u32) -> Option<u32> {
        if self.bracket() != RangeBracket::Short {
            return None;
        }
        self.range_hexes = self.weapon_min_range.saturating_sub(offset).max(1);
        Some(self.range_hexes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_picks_land_on_first_hex_of_band() {
        let mut ctx = AttackContext::default();
        ctx.select_bracket(RangeBracket::Medium);
        assert_eq!(ctx.range_hexes, 7);
        assert_eq!(ctx.bracket(), RangeBracket::Medium);
        ctx.select_bracket(RangeBracket::Long);
        assert_eq!(ctx.range_hexes, 13);
        ctx.select_bracket(RangeBracket::Beyond);
        assert_eq!(ctx.range_hexes, 19);
        assert_eq!(ctx.bracket(), RangeBracket::Beyond);
        ctx.select_bracket(RangeBracket::Short);
        assert_eq!(ctx.range_hexes, 3);
    }

    #[test]
    fn short_pick_keeps_inside_minimum_offset() {
        let mut ctx = AttackContext {
            range_hexes: 1,
            ..AttackContext::default()
        };
        assert_eq!(ctx.inside_minimum(), 2);
        ctx.select_bracket(RangeBracket::Short);
        assert_eq!(ctx.range_hexes, 1);
    }

    #[test]
    fn short_pick_never_goes_below_one_hex() {
        let mut ctx = AttackContext {
            weapon_min_range: 0,
            range_hexes: 10,
            ..AttackContext::default()
        };
        ctx.select_bracket(RangeBracket::Short);
        assert_eq!(ctx.range_hexes, 1);
    }

    #[test]
    fn inside_minimum_options_are_capped() {
        let ctx = AttackContext::default();
        assert_eq!(ctx.inside_minimum_options(), vec![0, 1, 2]);

        let long_min = AttackContext {
            weapon_min_range: 9,
            ..AttackContext::default()
        };
        assert_eq!(long_min.inside_minimum_options(), vec![0, 1, 2, 3, 4, 5]);

        let no_min = AttackContext {
            weapon_min_range: 0,
            ..AttackContext::default()
        };
        assert_eq!(no_min.inside_minimum_options(), vec![0]);
    }

    #[test]
    fn inside_minimum_pick_requires_short_range() {
        let mut ctx = AttackContext::default();
        assert_eq!(ctx.select_inside_minimum(1), None);
        assert_eq!(ctx.range_hexes, 10);

        ctx.select_bracket(RangeBracket::Short);
        assert_eq!(ctx.select_inside_minimum(2), Some(1));
        assert_eq!(crate::gator::minimum_range_modifier(&ctx), 3);
        assert_eq!(ctx.select_inside_minimum(0), Some(3));
    }
}
