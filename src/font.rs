//! # Morphing Glyph Catalog
//!
//! Every shape the clock can show is a [`Glyph`]: either a transition that
//! morphs one character into another over a progress scalar `t` in
//! `[0, 1]`, or one of the two static symbols (`:` and blank). A digit at
//! rest is simply progress 0 of its own outgoing transition, so `"3"`
//! resolves to the `"3_4"` glyph.
//!
//! ## Design Grid
//! All geometry is authored on a 144-unit tall grid ([`DRAW_HEIGHT`]). Widths
//! vary per glyph: 144 for most digits, 128 for `3` and `5`, 100 for `1`,
//! 48 for the colon and 0 for a blank.
//!
//! ## Timing
//! A transition splits `t` into overlapping sub-windows with
//! [`progress`](crate::math::progress), one per moving part, each eased
//! with [`decelerate5`](crate::math::decelerate5). `width_at` uses the same
//! windows and curves as the shape it measures, so layout and paint move
//! together.
//!
//! ## Lookup Policy
//! [`Font::glyph`] never fails: an unknown key resolves to `"0_1"` so a
//! missing shape can never stop the clock from drawing.

use crate::canvas::GlyphCanvas;
use crate::canvas::Ink::{One, Three, Two};
use crate::math::{decelerate5, lerp, progress};
use std::collections::BTreeMap;
use tracing::trace;

/// Height of the glyph design grid, in design units.
pub const DRAW_HEIGHT: f32 = 144.0;

/// Key substituted for any lookup that misses the catalog.
pub const DEFAULT_GLYPH_KEY: &str = "0_1";

/// The closed set of drawable shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Glyph {
    ZeroOne,
    OneTwo,
    TwoThree,
    ThreeFour,
    FourFive,
    FiveSix,
    SixSeven,
    SevenEight,
    EightNine,
    NineZero,
    BlankOne,
    OneBlank,
    TwoBlank,
    ThreeZero,
    FiveZero,
    TwoOne,
    Colon,
    Space,
}

impl Glyph {
    pub const ALL: [Glyph; 18] = [
        Glyph::ZeroOne,
        Glyph::OneTwo,
        Glyph::TwoThree,
        Glyph::ThreeFour,
        Glyph::FourFive,
        Glyph::FiveSix,
        Glyph::SixSeven,
        Glyph::SevenEight,
        Glyph::EightNine,
        Glyph::NineZero,
        Glyph::BlankOne,
        Glyph::OneBlank,
        Glyph::TwoBlank,
        Glyph::ThreeZero,
        Glyph::FiveZero,
        Glyph::TwoOne,
        Glyph::Colon,
        Glyph::Space,
    ];

    /// Catalog key: `"<start>_<end>"` for transitions, the symbol otherwise.
    pub fn key(self) -> &'static str {
        match self {
            Glyph::ZeroOne => "0_1",
            Glyph::OneTwo => "1_2",
            Glyph::TwoThree => "2_3",
            Glyph::ThreeFour => "3_4",
            Glyph::FourFive => "4_5",
            Glyph::FiveSix => "5_6",
            Glyph::SixSeven => "6_7",
            Glyph::SevenEight => "7_8",
            Glyph::EightNine => "8_9",
            Glyph::NineZero => "9_0",
            Glyph::BlankOne => " _1",
            Glyph::OneBlank => "1_ ",
            Glyph::TwoBlank => "2_ ",
            Glyph::ThreeZero => "3_0",
            Glyph::FiveZero => "5_0",
            Glyph::TwoOne => "2_1",
            Glyph::Colon => ":",
            Glyph::Space => " ",
        }
    }

    /// Characters this glyph shows at `t = 0` and `t = 1`.
    pub fn endpoints(self) -> (char, char) {
        match self {
            Glyph::ZeroOne => ('0', '1'),
            Glyph::OneTwo => ('1', '2'),
            Glyph::TwoThree => ('2', '3'),
            Glyph::ThreeFour => ('3', '4'),
            Glyph::FourFive => ('4', '5'),
            Glyph::FiveSix => ('5', '6'),
            Glyph::SixSeven => ('6', '7'),
            Glyph::SevenEight => ('7', '8'),
            Glyph::EightNine => ('8', '9'),
            Glyph::NineZero => ('9', '0'),
            Glyph::BlankOne => (' ', '1'),
            Glyph::OneBlank => ('1', ' '),
            Glyph::TwoBlank => ('2', ' '),
            Glyph::ThreeZero => ('3', '0'),
            Glyph::FiveZero => ('5', '0'),
            Glyph::TwoOne => ('2', '1'),
            Glyph::Colon => (':', ':'),
            Glyph::Space => (' ', ' '),
        }
    }

    /// The glyph that draws `c` at rest.
    pub fn resting(c: char) -> Option<Glyph> {
        Some(match c {
            '0' => Glyph::ZeroOne,
            '1' => Glyph::OneTwo,
            '2' => Glyph::TwoThree,
            '3' => Glyph::ThreeFour,
            '4' => Glyph::FourFive,
            '5' => Glyph::FiveSix,
            '6' => Glyph::SixSeven,
            '7' => Glyph::SevenEight,
            '8' => Glyph::EightNine,
            '9' => Glyph::NineZero,
            ':' => Glyph::Colon,
            ' ' => Glyph::Space,
            _ => return None,
        })
    }

    /// Resting glyph this transition is pixel-identical to at `t = 0`.
    pub fn canonical_start(self) -> Glyph {
        Glyph::resting(self.endpoints().0).unwrap_or(self)
    }

    /// Resting glyph this transition is pixel-identical to at `t = 1`.
    pub fn canonical_end(self) -> Glyph {
        Glyph::resting(self.endpoints().1).unwrap_or(self)
    }

    /// Width in design units of what [`draw`](Self::draw) paints at `t`.
    pub fn width_at(self, t: f32) -> f32 {
        let first_half = || decelerate5(progress(t, 0.0, 0.5));
        let second_half = || decelerate5(progress(t, 0.5, 1.0));
        match self {
            Glyph::ZeroOne => lerp(second_half(), lerp(first_half(), 144.0, 192.0), 100.0),
            Glyph::OneTwo => lerp(first_half(), 100.0, 144.0),
            Glyph::TwoThree | Glyph::FourFive => lerp(first_half(), 144.0, 128.0),
            Glyph::ThreeFour => lerp(second_half(), 128.0, 144.0),
            Glyph::FiveSix => lerp(decelerate5(progress(t, 0.1, 1.0)), 128.0, 144.0),
            Glyph::SixSeven | Glyph::SevenEight | Glyph::EightNine | Glyph::NineZero => 144.0,
            Glyph::BlankOne => lerp(first_half(), 0.0, 100.0),
            Glyph::OneBlank => lerp(second_half(), 100.0, 0.0),
            Glyph::TwoBlank => lerp(first_half(), 144.0, lerp(second_half(), 72.0, 0.0)),
            Glyph::ThreeZero | Glyph::FiveZero => lerp(first_half(), 128.0, 144.0),
            Glyph::TwoOne => lerp(first_half(), 144.0, 100.0),
            Glyph::Colon => 48.0,
            Glyph::Space => 0.0,
        }
    }

    /// Records the shape at progress `t` into `c`, in design units.
    ///
    /// The canvas transform is left as it was found.
    pub fn draw(self, t: f32, c: &mut GlyphCanvas<'_>) {
        c.scoped(|c| match self {
            Glyph::ZeroOne => zero_one(t, c),
            Glyph::OneTwo => one_two(t, c),
            Glyph::TwoThree => two_three(t, c),
            Glyph::ThreeFour => three_four(t, c),
            Glyph::FourFive => four_five(t, c),
            Glyph::FiveSix => five_six(t, c),
            Glyph::SixSeven => six_seven(t, c),
            Glyph::SevenEight => seven_eight(t, c),
            Glyph::EightNine => eight_nine(t, c),
            Glyph::NineZero => nine_zero(t, c),
            Glyph::BlankOne => blank_one(t, c),
            Glyph::OneBlank => one_blank(t, c),
            Glyph::TwoBlank => two_blank(t, c),
            Glyph::ThreeZero => three_zero(t, c),
            Glyph::FiveZero => five_zero(t, c),
            Glyph::TwoOne => two_one(t, c),
            Glyph::Colon => {
                c.oval(0.0, 0.0, 48.0, 48.0, Two);
                c.oval(0.0, 96.0, 48.0, 144.0, Three);
            }
            Glyph::Space => {}
        });
    }
}

/// Key-addressed view of the catalog, digits included as aliases.
#[derive(Debug, Clone)]
pub struct Font {
    glyphs: BTreeMap<&'static str, Glyph>,
}

impl Default for Font {
    fn default() -> Self {
        Self::new()
    }
}

impl Font {
    pub fn new() -> Self {
        let mut glyphs: BTreeMap<&'static str, Glyph> =
            Glyph::ALL.iter().map(|g| (g.key(), *g)).collect();
        const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        for (digit, key) in DIGITS.iter().zip(&Glyph::ALL[..10]) {
            glyphs.insert(*digit, *key);
        }
        Self { glyphs }
    }

    /// Strict lookup.
    pub fn get(&self, key: &str) -> Option<Glyph> {
        self.glyphs.get(key).copied()
    }

    /// Lookup that falls back to `"0_1"` on a miss.
    pub fn glyph(&self, key: &str) -> Glyph {
        self.get(key).unwrap_or_else(|| {
            trace!(key, "glyph missing from catalog, using {}", DEFAULT_GLYPH_KEY);
            Glyph::ZeroOne
        })
    }

    /// Glyph for one character at rest, with the same fallback as [`glyph`](Self::glyph).
    pub fn resting(&self, c: char) -> Glyph {
        Glyph::resting(c).unwrap_or_else(|| {
            trace!(%c, "no resting glyph, using {}", DEFAULT_GLYPH_KEY);
            Glyph::ZeroOne
        })
    }

    /// Glyph morphing `from` into `to`, with the same fallback as [`glyph`](Self::glyph).
    pub fn transition(&self, from: char, to: char) -> Glyph {
        if from == to {
            return self.resting(from);
        }
        Glyph::ALL[..16]
            .iter()
            .copied()
            .find(|g| g.endpoints() == (from, to))
            .unwrap_or_else(|| {
                trace!(%from, %to, "transition missing from catalog, using {}", DEFAULT_GLYPH_KEY);
                Glyph::ZeroOne
            })
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.glyphs.keys().copied()
    }
}

// Transition geometry. Sub-shape order is paint order.

fn zero_one(t: f32, c: &mut GlyphCanvas<'_>) {
    let d1 = decelerate5(progress(t, 0.0, 0.5));
    let d2 = decelerate5(progress(t, 0.5, 1.0));

    // 0, squashed and straightened
    c.scoped(|c| {
        // make room for the squashed zero
        c.translate(lerp(d1, 0.0, lerp(d2, 24.0, 0.0)), 0.0);
        c.scale_uniform(lerp(d1, 1.0, 2.0 / 3.0), 72.0, 144.0);
        c.scale_uniform(lerp(d2, 1.0, 0.7), 72.0, 96.0);
        c.rotate(lerp(d1, 45.0, 0.0), 72.0, 72.0);

        let stretch_x = lerp(d1, 0.0, lerp(d2, 72.0, -36.0));

        c.fill_path(Two, |p| {
            p.move_to(72.0 - stretch_x, 144.0);
            p.arc_to(-stretch_x, 0.0, 144.0 - stretch_x, 144.0, 90.0, 180.0, true);
            p.line_to(72.0 + stretch_x, 0.0);
            p.line_to(72.0 + stretch_x, 144.0);
            p.line_to(72.0 - stretch_x, 144.0);
            p.close();
        });

        c.fill_path(Three, |p| {
            p.arc_to(stretch_x, 0.0, 144.0 + stretch_x, 144.0, -90.0, 180.0, true);
            p.close();
        });
    });

    // 1
    if d2 > 0.0 {
        c.rect(lerp(d2, 28.0, 0.0), lerp(d2, 72.0, 0.0), 100.0, lerp(d2, 144.0, 48.0), Two);
        c.rect(28.0, lerp(d2, 144.0, 48.0), 100.0, 144.0, Three);
    }
}

fn one_two(t: f32, c: &mut GlyphCanvas<'_>) {
    let d = 1.0 - decelerate5(progress(t, 0.0, 0.5));
    let d1 = decelerate5(progress(t, 0.3, 0.8));
    let d2 = decelerate5(progress(t, 0.5, 1.0));

    // 2
    if d1 > 0.0 {
        c.scoped(|c| {
            c.translate(lerp(d2, 72.0, 0.0), 0.0);
            c.fill_path(Three, |p| {
                p.move_to(0.0, 144.0);
                p.line_to(72.0, 72.0);
                p.line_to(72.0, 144.0);
                p.line_to(0.0, 144.0);
            });
        });

        c.scoped(|c| {
            c.translate(108.0, lerp(d1, 72.0, 0.0));
            c.arc(-36.0, 0.0, 36.0, 72.0, -90.0, 180.0, One);
        });

        c.scoped(|c| {
            c.translate(0.0, lerp(d1, 72.0, 0.0));
            c.rect(lerp(d2, 72.0, 8.0), 0.0, lerp(d2, 144.0, 108.0), 72.0, One);
        });

        c.rect(72.0, 72.0, 144.0, 144.0, Two);
    }

    // 1
    if d > 0.0 {
        c.scoped(|c| {
            c.translate(lerp(d, 44.0, 0.0), 0.0);
            c.rect(lerp(d, 28.0, 0.0), lerp(d, 72.0, 0.0), 100.0, lerp(d, 144.0, 48.0), Two);
            c.rect(28.0, lerp(d, 144.0, 48.0), 100.0, 144.0, Three);
        });
    }
}

/// The outgoing three of `3_4`: `d = 1` is the resting three, `d = 0` its
/// collapsed intermediate form.
fn three_body(d: f32, top_joined: bool, c: &mut GlyphCanvas<'_>) {
    // middle rectangle
    c.rect(lerp(d, 56.0, 32.0), lerp(d, 72.0, 48.0), lerp(d, 128.0, 80.0), lerp(d, 144.0, 96.0), Two);

    // half-circle
    c.scoped(|c| {
        c.scale_uniform(lerp(d, 0.7, 1.0), 128.0, 144.0);
        c.arc(32.0, 48.0, 128.0, 144.0, -90.0, 180.0, Three);
    });

    // bottom rectangle
    c.rect(lerp(d, 56.0, 0.0), lerp(d, 72.0, 96.0), lerp(d, 128.0, 80.0), lerp(d, 144.0, 144.0), One);

    // top part with triangle
    c.scoped(|c| {
        c.translate(0.0, lerp(d, 72.0, 0.0));
        if top_joined {
            c.fill_path(Three, |p| {
                p.move_to(80.0, 0.0);
                p.line_to(128.0, 0.0);
                p.line_to(80.0, 48.0);
                p.line_to(0.0, 48.0);
                p.line_to(0.0, 0.0);
                p.line_to(80.0, 0.0);
                p.close();
            });
        } else {
            c.fill_path(Three, |p| {
                p.move_to(80.0, 0.0);
                p.line_to(128.0, 0.0);
                p.line_to(80.0, 48.0);
                p.close();
            });
            c.rect(lerp(d, 56.0, 0.0), 0.0, lerp(d, 128.0, 80.0), lerp(d, 72.0, 48.0), Three);
        }
    });
}

fn two_three(t: f32, c: &mut GlyphCanvas<'_>) {
    let d = decelerate5(progress(t, 0.0, 0.5));
    let d1 = decelerate5(progress(t, 0.5, 1.0));

    if d < 1.0 {
        // 2
        c.scoped(|c| {
            c.translate(lerp(d, 0.0, -16.0), 0.0);

            c.scoped(|c| {
                c.translate(lerp(d, 0.0, 72.0), 0.0);
                c.fill_path(Three, |p| {
                    p.move_to(0.0, 144.0);
                    p.line_to(72.0, 72.0);
                    p.line_to(72.0, 144.0);
                    p.line_to(0.0, 144.0);
                });
            });

            if d == 0.0 {
                c.fill_path(One, |p| {
                    p.move_to(8.0, 0.0);
                    p.line_to(108.0, 0.0);
                    p.arc_to(108.0 - 36.0, 0.0, 108.0 + 36.0, 72.0, -90.0, 180.0, true);
                    p.line_to(108.0, 72.0);
                    p.line_to(8.0, 72.0);
                    p.line_to(8.0, 0.0);
                    p.close();
                });
            } else {
                c.arc(
                    108.0 - 36.0,
                    lerp(d, 0.0, 72.0),
                    108.0 + 36.0,
                    72.0 + lerp(d, 0.0, 72.0),
                    -90.0,
                    180.0,
                    One,
                );
                c.rect(lerp(d, 8.0, 72.0), lerp(d, 0.0, 72.0), lerp(d, 108.0, 144.0), lerp(d, 72.0, 144.0), One);
            }
            c.rect(72.0, 72.0, 144.0, 144.0, Two);
        });
    } else {
        // 3
        c.scoped(|c| {
            c.scale_uniform(lerp(d1, 0.7, 1.0), 128.0, 144.0);
            c.arc(32.0, 48.0, 128.0, 144.0, -90.0, 180.0, Three);
        });

        c.rect(lerp(d1, 56.0, 0.0), lerp(d1, 72.0, 96.0), lerp(d1, 128.0, 80.0), lerp(d1, 144.0, 144.0), One);

        c.scoped(|c| {
            c.translate(0.0, lerp(d1, 72.0, 0.0));
            c.fill_path(Three, |p| {
                p.move_to(128.0, 0.0);
                p.line_to(80.0, 48.0);
                p.line_to(80.0, 0.0);
                p.close();
            });
            c.rect(lerp(d1, 56.0, 0.0), 0.0, lerp(d1, 128.0, 80.0), lerp(d1, 72.0, 48.0), Three);
        });

        c.rect(lerp(d1, 56.0, 32.0), lerp(d1, 72.0, 48.0), lerp(d1, 128.0, 80.0), lerp(d1, 144.0, 96.0), Two);
    }
}

fn three_four(t: f32, c: &mut GlyphCanvas<'_>) {
    let d1 = 1.0 - decelerate5(progress(t, 0.0, 0.5));
    let d2 = decelerate5(progress(t, 0.5, 1.0));

    if d1 > 0.0 {
        // 3
        c.scoped(|c| {
            c.translate(lerp(d1, 16.0, 0.0), 0.0);
            three_body(d1, d1 == 1.0, c);
        });
    } else {
        // 4
        c.rect(72.0, lerp(d2, 144.0, 108.0), 144.0, 144.0, Two);
        c.rect(lerp(d2, 72.0, 0.0), lerp(d2, 144.0, 72.0), 144.0, lerp(d2, 144.0, 108.0), One);

        c.scoped(|c| {
            c.scale_uniform(d2, 144.0, 144.0);
            c.fill_path(Two, |p| {
                p.move_to(72.0, 72.0);
                p.line_to(72.0, 0.0);
                p.line_to(0.0, 72.0);
                p.line_to(72.0, 72.0);
            });
        });

        c.rect(72.0, lerp(d2, 72.0, 0.0), 144.0, lerp(d2, 144.0, 72.0), Three);
    }
}

fn four_five(t: f32, c: &mut GlyphCanvas<'_>) {
    let d = decelerate5(progress(t, 0.0, 0.5));
    let d1 = decelerate5(progress(t, 0.5, 1.0));

    if d < 1.0 {
        // 4
        c.rect(lerp(d, 72.0, 0.0), 108.0, lerp(d, 144.0, 72.0), 144.0, Two);
        c.rect(lerp(d, 72.0, 0.0), lerp(d, 0.0, 72.0), lerp(d, 144.0, 72.0), lerp(d, 72.0, 144.0), Three);

        c.scoped(|c| {
            c.scale_uniform(1.0 - d, 0.0, 144.0);
            c.fill_path(Two, |p| {
                p.move_to(72.0, 72.0);
                p.line_to(72.0, 0.0);
                p.line_to(0.0, 72.0);
                p.line_to(72.0, 72.0);
            });
        });

        c.rect(0.0, 72.0, lerp(d, 144.0, 72.0), lerp(d, 108.0, 144.0), One);
    } else {
        // 5
        c.rect(80.0, lerp(d1, 72.0, 0.0), lerp(d1, 80.0, 128.0), lerp(d1, 144.0, 48.0), Two);

        c.scoped(|c| {
            c.scale_uniform(lerp(d1, 0.75, 1.0), 0.0, 144.0);
            c.translate(lerp(d1, -48.0, 0.0), 0.0);
            c.arc(32.0, 48.0, 128.0, 144.0, -90.0, 180.0, Three);
        });

        c.rect(0.0, 96.0, 80.0, 144.0, Two);
        c.rect(0.0, lerp(d1, 72.0, 0.0), 80.0, lerp(d1, 144.0, 96.0), One);
    }
}

fn five_six(t: f32, c: &mut GlyphCanvas<'_>) {
    let d = decelerate5(progress(t, 0.0, 0.7));
    let d1 = decelerate5(progress(t, 0.1, 1.0));

    // 5 except the half-circle
    if d < 1.0 {
        c.scoped(|c| {
            c.scale_uniform(lerp(d, 1.0, 0.25), 108.0, 96.0);
            c.rect(80.0, 0.0, 128.0, 48.0, Two);
            c.rect(0.0, 96.0, 80.0, 144.0, Two);
            c.rect(0.0, 0.0, 80.0, 96.0, One);
        });
    }

    // half-circle
    c.scoped(|c| {
        c.rotate(lerp(d1, 0.0, 90.0), 72.0, 72.0);

        if d1 == 0.0 {
            c.arc(32.0, 48.0, 128.0, 144.0, -90.0, 180.0, Three);
        } else {
            c.scale_uniform(lerp(d1, 2.0 / 3.0, 1.0), 80.0, 144.0);
            c.translate(lerp(d1, 8.0, 0.0), 0.0);
            c.arc(0.0, 0.0, 144.0, 144.0, -90.0, 180.0, Three);
        }

        // 6, just the parallelogram
        if d1 > 0.0 {
            c.scoped(|c| {
                c.rotate(-90.0, 72.0, 72.0);
                c.fill_path(Two, |p| {
                    p.move_to(0.0, 72.0);
                    p.line_to(lerp(d1, 0.0, 36.0), lerp(d1, 72.0, 0.0));
                    p.line_to(lerp(d1, 72.0, 108.0), lerp(d1, 72.0, 0.0));
                    p.line_to(72.0, 72.0);
                    p.line_to(0.0, 72.0);
                });
            });
        }
    });
}

fn six_seven(t: f32, c: &mut GlyphCanvas<'_>) {
    let d = decelerate5(t);

    // 7 rectangle
    c.rect(lerp(d, 72.0, 0.0), 0.0, 72.0, 72.0, Three);

    // 6 circle
    c.scoped(|c| {
        c.translate(lerp(d, 0.0, 36.0), 0.0);

        if d < 1.0 {
            c.arc(0.0, 0.0, 144.0, 144.0, lerp(d, 180.0, -64.0), -180.0, Three);
        }

        c.fill_path(Two, |p| {
            p.move_to(36.0, 0.0);
            p.line_to(108.0, 0.0);
            p.line_to(lerp(d, 72.0, 36.0), lerp(d, 72.0, 144.0));
            p.line_to(lerp(d, 0.0, -36.0), lerp(d, 72.0, 144.0));
            p.close();
        });
    });
}

fn seven_eight(t: f32, c: &mut GlyphCanvas<'_>) {
    let d = decelerate5(progress(t, 0.0, 0.5));
    let d1 = decelerate5(progress(t, 0.2, 0.5));
    let d2 = decelerate5(progress(t, 0.5, 1.0));

    // 8
    if d1 > 0.0 {
        if d2 > 0.0 {
            c.scoped(|c| {
                c.translate(0.0, lerp(d2, 96.0, 0.0));
                c.round_rect(24.0, 0.0, 120.0, 48.0, 24.0, 24.0, Three);
            });
        }

        c.scoped(|c| {
            c.translate(lerp(d1, 24.0, 0.0), 0.0);
            c.scale_uniform(lerp(d2, 0.5, 1.0), 48.0, 144.0);
            c.arc(0.0, 48.0, 96.0, 144.0, 90.0, 180.0, One);
        });

        c.scoped(|c| {
            c.translate(lerp(d1, -24.0, 0.0), 0.0);
            c.scale_uniform(lerp(d2, 0.5, 1.0), 96.0, 144.0);
            c.arc(48.0, 48.0, 144.0, 144.0, -90.0, 180.0, Two);
        });

        c.scoped(|c| {
            c.scale(lerp(d1, 0.0, 1.0), 1.0, 72.0, 0.0);
            c.rect(48.0, lerp(d2, 96.0, 48.0), 96.0, 144.0, One);
            c.rect(lerp(d2, 48.0, 96.0), lerp(d2, 96.0, 48.0), 96.0, 144.0, Two);
        });
    }

    // 7
    if d < 1.0 {
        c.rect(lerp(d, 0.0, 48.0), lerp(d, 0.0, 96.0), lerp(d, 72.0, 96.0), lerp(d, 72.0, 144.0), Three);

        c.fill_path(Two, |p| {
            p.move_to(lerp(d, 72.0, 48.0), lerp(d, 0.0, 96.0));
            p.line_to(lerp(d, 144.0, 96.0), lerp(d, 0.0, 96.0));
            p.line_to(lerp(d, 72.0, 96.0), 144.0);
            p.line_to(lerp(d, 0.0, 48.0), 144.0);
            p.close();
        });
    }
}

fn eight_nine(t: f32, c: &mut GlyphCanvas<'_>) {
    let d = decelerate5(progress(t, 0.0, 0.5));
    let d1 = decelerate5(progress(t, 0.5, 1.0));

    if d < 1.0 {
        // 8
        c.scoped(|c| {
            c.translate(0.0, lerp(d, 0.0, 48.0));
            c.round_rect(24.0, 0.0, 120.0, 48.0, 24.0, 24.0, Three);
        });

        if d == 0.0 {
            // left and middle bottom
            c.fill_path(One, |p| {
                p.move_to(48.0, 48.0);
                p.line_to(96.0, 48.0);
                p.line_to(96.0, 144.0);
                p.line_to(48.0, 144.0);
                p.arc_to(0.0, 48.0, 96.0, 144.0, 90.0, 180.0, true);
            });

            c.arc(48.0, 48.0, 144.0, 144.0, -90.0, 180.0, Two);
        } else {
            c.rect(lerp(d, 48.0, 72.0) - 2.0, lerp(d, 48.0, 0.0), lerp(d, 96.0, 72.0) + 2.0, 144.0, One);

            c.scoped(|c| {
                c.scale_uniform(lerp(d, 2.0 / 3.0, 1.0), 0.0, 144.0);
                c.arc(0.0, 0.0, 144.0, 144.0, 90.0, 180.0, One);
            });

            c.scoped(|c| {
                c.scale_uniform(lerp(d, 2.0 / 3.0, 1.0), 144.0, 144.0);
                c.arc(0.0, 0.0, 144.0, 144.0, -90.0, 180.0, Two);
            });
        }
    } else {
        // 9
        c.scoped(|c| {
            c.rotate(lerp(d1, -90.0, -180.0), 72.0, 72.0);

            c.fill_path(Three, |p| {
                p.move_to(0.0, 72.0);
                p.line_to(lerp(d1, 0.0, 36.0), lerp(d1, 72.0, 0.0));
                p.line_to(lerp(d1, 72.0, 108.0), lerp(d1, 72.0, 0.0));
                p.line_to(72.0, 72.0);
                p.line_to(0.0, 72.0);
            });

            // vanishing arc
            c.arc(0.0, 0.0, 144.0, 144.0, -180.0, lerp(d1, 180.0, 0.0), One);

            // primary arc
            c.arc(0.0, 0.0, 144.0, 144.0, 0.0, 180.0, Two);
        });
    }
}

fn nine_zero(t: f32, c: &mut GlyphCanvas<'_>) {
    let d = decelerate5(t);

    c.scoped(|c| {
        c.rotate(lerp(d, -180.0, -225.0), 72.0, 72.0);

        c.fill_path(Three, |p| {
            p.move_to(0.0, 72.0);
            p.line_to(lerp(d, 36.0, 0.0), lerp(d, 0.0, 72.0));
            p.line_to(lerp(d, 108.0, 72.0), lerp(d, 0.0, 72.0));
            p.line_to(72.0, 72.0);
            p.line_to(0.0, 72.0);
        });

        c.arc(0.0, 0.0, 144.0, 144.0, 0.0, lerp(d, 0.0, -180.0), Three);
        c.arc(0.0, 0.0, 144.0, 144.0, 0.0, 180.0, Two);
    });
}

fn blank_one(t: f32, c: &mut GlyphCanvas<'_>) {
    let d1 = decelerate5(progress(t, 0.0, 0.5));
    let d2 = decelerate5(progress(t, 0.5, 1.0));

    c.scale_uniform(lerp(d1, 0.0, 1.0), 0.0, 144.0);
    c.rect(lerp(d2, 28.0, 0.0), lerp(d2, 72.0, 0.0), 100.0, lerp(d2, 144.0, 48.0), Two);

    if d2 > 0.0 {
        c.rect(28.0, lerp(d2, 144.0, 48.0), 100.0, 144.0, Three);
    }
}

fn one_blank(t: f32, c: &mut GlyphCanvas<'_>) {
    let d1 = decelerate5(progress(t, 0.0, 0.5));
    let d2 = decelerate5(progress(t, 0.5, 1.0));

    c.scale_uniform(lerp(d2, 1.0, 0.0), 0.0, 144.0);
    c.rect(lerp(d1, 0.0, 28.0), lerp(d1, 0.0, 72.0), 100.0, lerp(d1, 48.0, 144.0), Two);

    if d1 < 1.0 {
        c.rect(28.0, lerp(d1, 48.0, 144.0), 100.0, 144.0, Three);
    }
}

fn two_blank(t: f32, c: &mut GlyphCanvas<'_>) {
    let d = decelerate5(progress(t, 0.0, 0.5));
    let d1 = decelerate5(progress(t, 0.5, 1.0));

    c.scoped(|c| {
        c.translate(lerp(d, 0.0, -72.0), 0.0);

        if d < 1.0 {
            c.scoped(|c| {
                c.translate(lerp(d, 0.0, 72.0), 0.0);
                c.fill_path(Three, |p| {
                    p.move_to(0.0, 144.0);
                    p.line_to(72.0, 72.0);
                    p.line_to(72.0, 144.0);
                    p.line_to(0.0, 144.0);
                });
            });

            c.scoped(|c| {
                c.translate(0.0, lerp(d, 0.0, 72.0));
                c.translate(108.0, 0.0);
                c.arc(-36.0, 0.0, 36.0, 72.0, -90.0, 180.0, One);
            });

            c.rect(lerp(d, 8.0, 72.0), lerp(d, 0.0, 72.0), lerp(d, 108.0, 144.0), lerp(d, 72.0, 144.0), One);
        }

        c.scoped(|c| {
            c.scale_uniform(lerp(d1, 1.0, 0.0), 72.0, 144.0);
            c.rect(72.0, 72.0, 144.0, 144.0, Two);
        });
    });
}

fn three_zero(t: f32, c: &mut GlyphCanvas<'_>) {
    let d1 = 1.0 - decelerate5(progress(t, 0.0, 0.5));
    let d2 = decelerate5(progress(t, 0.5, 1.0));

    c.scoped(|c| {
        c.rotate(lerp(d2, 0.0, 45.0), 72.0, 72.0);
        c.translate(lerp(d1, lerp(d2, 16.0, -8.0), 0.0), 0.0);

        if d1 > 0.0 {
            // top of the 3 with its triangle
            c.scoped(|c| {
                c.translate(0.0, lerp(d1, 48.0, 0.0));
                let x = lerp(d1, 48.0, 0.0);
                c.fill_path(Three, |p| {
                    p.move_to(128.0 - x, 0.0);
                    p.line_to(80.0 - x, 48.0);
                    p.line_to(80.0 - x, 0.0);
                });
                c.rect(lerp(d1, 32.0, 0.0), 0.0, 80.0, 48.0, Three);
            });
        }

        c.rect(lerp(d1, lerp(d2, 32.0, 80.0), 0.0), 96.0, 80.0, 144.0, One);
        c.rect(lerp(d2, 32.0, 80.0), 48.0, 80.0, 96.0, Two);

        // 0
        c.scale_uniform(lerp(d2, 2.0 / 3.0, 1.0), 80.0, 144.0);
        c.translate(8.0, 0.0);
        if d2 > 0.0 {
            c.scoped(|c| {
                c.rotate(lerp(d2, -180.0, 0.0), 72.0, 72.0);
                c.arc(0.0, 0.0, 144.0, 144.0, 90.0, 180.0, Two);
            });
        }
        c.arc(0.0, 0.0, 144.0, 144.0, -90.0, 180.0, Three);
    });
}

fn five_zero(t: f32, c: &mut GlyphCanvas<'_>) {
    let d = decelerate5(progress(t, 0.0, 0.5));
    let d1 = decelerate5(progress(t, 0.5, 1.0));

    c.scoped(|c| {
        c.rotate(lerp(d1, 0.0, 45.0), 72.0, 72.0);

        // 5 except the half-circle
        if d < 1.0 {
            c.rect(80.0, lerp(d, 0.0, 48.0), lerp(d, 128.0, 80.0), lerp(d, 48.0, 144.0), Two);
            c.rect(0.0, 96.0, 80.0, 144.0, Two);
        }

        c.rect(lerp(d1, 0.0, 80.0), lerp(d, 0.0, lerp(d1, 48.0, 0.0)), 80.0, lerp(d, 96.0, 144.0), One);

        c.scale_uniform(lerp(d1, 2.0 / 3.0, 1.0), 80.0, 144.0);

        if d1 > 0.0 {
            c.scoped(|c| {
                c.rotate(lerp(d1, -180.0, 0.0), 72.0, 72.0);
                c.arc(0.0, 0.0, 144.0, 144.0, 90.0, 180.0, Two);
            });
        }

        c.translate(lerp(d1, 8.0, 0.0), 0.0);
        c.arc(0.0, 0.0, 144.0, 144.0, -90.0, 180.0, Three);
    });
}

fn two_one(t: f32, c: &mut GlyphCanvas<'_>) {
    let d = decelerate5(progress(t, 0.0, 0.5));
    let d1 = decelerate5(progress(t, 0.2, 0.5));
    let d2 = decelerate5(progress(t, 0.5, 1.0));

    if d1 < 1.0 {
        // 2
        c.scoped(|c| {
            c.translate(lerp(d, 0.0, 28.0), 0.0);
            c.fill_path(Three, |p| {
                p.move_to(0.0, 144.0);
                p.line_to(72.0, 72.0);
                p.line_to(72.0, 144.0);
                p.line_to(0.0, 144.0);
            });
        });

        c.scoped(|c| {
            c.translate(lerp(d, 108.0, 64.0), lerp(d1, 0.0, 72.0));
            c.arc(-36.0, 0.0, 36.0, 72.0, -90.0, 180.0, One);
        });

        c.scoped(|c| {
            c.translate(0.0, lerp(d1, 0.0, 72.0));
            c.rect(lerp(d, 8.0, 28.0), 0.0, lerp(d, 108.0, 100.0), 72.0, One);
        });

        c.scoped(|c| {
            c.translate(lerp(d, 0.0, -44.0), 0.0);
            c.rect(72.0, 72.0, 144.0, 144.0, Two);
        });
    } else {
        // 1
        c.rect(lerp(d2, 28.0, 0.0), lerp(d2, 72.0, 0.0), 100.0, lerp(d2, 144.0, 48.0), Two);
        c.rect(28.0, lerp(d2, 144.0, 48.0), 100.0, 144.0, Three);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Scratch;
    use tiny_skia::Transform;

    #[test]
    fn test_catalog_has_aliases_and_shapes() {
        let font = Font::new();
        assert_eq!(font.keys().count(), 28);
        for digit in '0'..='9' {
            let glyph = font.get(&digit.to_string()).expect("digit alias");
            assert_eq!(glyph.endpoints().0, digit, "{digit} rests at its outgoing transition");
        }
        assert_eq!(font.get("3"), Some(Glyph::ThreeFour));
        assert_eq!(font.get(":"), Some(Glyph::Colon));
    }

    #[test]
    fn test_unknown_key_falls_back() {
        let font = Font::new();
        assert_eq!(font.get("4_2"), None);
        assert_eq!(font.glyph("4_2"), Glyph::ZeroOne);
        assert_eq!(font.transition('4', '2'), Glyph::ZeroOne);
        assert_eq!(font.resting('x'), Glyph::ZeroOne);
    }

    #[test]
    fn test_transition_lookup_matches_keys() {
        let font = Font::new();
        for glyph in Glyph::ALL {
            let (from, to) = glyph.endpoints();
            assert_eq!(font.transition(from, to), glyph, "lookup of {:?}", glyph.key());
            assert_eq!(font.glyph(glyph.key()), glyph);
        }
        assert_eq!(font.transition('7', '7'), Glyph::SevenEight);
    }

    #[test]
    fn test_boundary_widths_match_canonical_glyphs() {
        for glyph in Glyph::ALL {
            let start = glyph.canonical_start().width_at(0.0);
            let end = glyph.canonical_end().width_at(0.0);
            assert!(
                (glyph.width_at(0.0) - start).abs() < 1e-4,
                "{:?} starts {} wide, expected {}",
                glyph.key(),
                glyph.width_at(0.0),
                start
            );
            assert!(
                (glyph.width_at(1.0) - end).abs() < 1e-4,
                "{:?} ends {} wide, expected {}",
                glyph.key(),
                glyph.width_at(1.0),
                end
            );
        }
    }

    #[test]
    fn test_resting_widths() {
        let widths: Vec<f32> = ('0'..='9')
            .map(|c| Glyph::resting(c).map(|g| g.width_at(0.0)).unwrap_or(-1.0))
            .collect();
        assert_eq!(widths, [144.0, 100.0, 144.0, 128.0, 144.0, 128.0, 144.0, 144.0, 144.0, 144.0]);
    }

    #[test]
    fn test_zero_one_widens_before_narrowing() {
        assert!(Glyph::ZeroOne.width_at(0.5) > 144.0, "the squashed zero needs extra room");
    }

    #[test]
    fn test_every_glyph_draws_at_every_stage() {
        let mut scratch = Scratch::new();
        for glyph in Glyph::ALL {
            for step in 0..=10 {
                scratch.clear();
                let t = step as f32 / 10.0;
                glyph.draw(t, &mut GlyphCanvas::new(&mut scratch, Transform::identity()));
                if glyph != Glyph::Space {
                    assert!(!scratch.shapes().is_empty(), "{:?} drew nothing at {t}", glyph.key());
                }
            }
        }
    }

    #[test]
    fn test_draw_leaves_transform_balanced() {
        let base = Transform::from_translate(3.0, 4.0);
        let mut scratch = Scratch::new();
        let mut canvas = GlyphCanvas::new(&mut scratch, base);
        Glyph::BlankOne.draw(0.3, &mut canvas);
        canvas.rect(0.0, 0.0, 10.0, 10.0, One);

        let last = scratch.shapes().last().unwrap();
        assert_eq!(last.transform, base);
    }
}
