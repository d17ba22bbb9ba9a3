//! Companion layout: windows pair up side by side, the second of each pair
//! becoming a vertically stacked companion of the first. Companion height
//! alternates between two configured ratios by pair parity.

use crate::context::Context;
use crate::models::{CompanionPosition, Orientation, VerticalPosition};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Companion {
    pub odd_companion_ratio: f64,
    pub even_companion_ratio: f64,
    pub companion_position: CompanionPosition,
}

impl Default for Companion {
    fn default() -> Self {
        Self {
            odd_companion_ratio: 0.3,
            even_companion_ratio: 0.4,
            companion_position: CompanionPosition::Up,
        }
    }
}

impl Companion {
    pub fn from_params(params: &[String]) -> Self {
        Self::try_from_params(params).unwrap_or_else(|| {
            tracing::warn!("invalid companion parameters {params:?}, using defaults");
            Self::default()
        })
    }

    fn try_from_params(params: &[String]) -> Option<Self> {
        let odd_companion_ratio = match params.first() {
            Some(param) => param.parse().ok()?,
            None => 0.3,
        };
        let even_companion_ratio = match params.get(1) {
            Some(param) => param.parse().ok()?,
            None => 0.4,
        };
        let companion_position = match params.get(2) {
            Some(param) => param.parse().ok()?,
            None => CompanionPosition::Up,
        };
        Some(Self {
            odd_companion_ratio,
            even_companion_ratio,
            companion_position,
        })
    }

    pub fn split_orientation(&self, count: usize) -> Option<Orientation> {
        (count >= 2 && count % 2 == 0).then_some(Orientation::Vertical)
    }

    pub fn arrange(&self, ctx: &mut Context, count: usize) {
        if count % 2 == 1 {
            // An odd window opens the next pair to the right of the
            // previous one.
            if count >= 3 {
                ctx.exec("move right");
            }
        } else {
            let pair = count / 2;
            let ratio = if pair % 2 == 1 {
                self.odd_companion_ratio
            } else {
                self.even_companion_ratio
            };
            if self.companion_position.resolve(pair) == VerticalPosition::Up {
                ctx.exec("move up");
            }
            let size = ctx.workspace_height(ratio);
            ctx.exec(&format!("resize set height {size}"));
        }
    }
}
