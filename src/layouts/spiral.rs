//! Spiral layout: the split axis alternates on every insertion, each new
//! region shrinking geometrically by `(1 - main_ratio)` per half-turn.

use crate::context::Context;
use crate::models::{Orientation, ScreenDirection};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spiral {
    pub main_ratio: f64,
    pub screen_direction: ScreenDirection,
}

impl Default for Spiral {
    fn default() -> Self {
        Self {
            main_ratio: 0.5,
            screen_direction: ScreenDirection::Outside,
        }
    }
}

impl Spiral {
    pub fn from_params(params: &[String]) -> Self {
        Self::try_from_params(params).unwrap_or_else(|| {
            tracing::warn!("invalid spiral parameters {params:?}, using defaults");
            Self::default()
        })
    }

    fn try_from_params(params: &[String]) -> Option<Self> {
        let main_ratio = match params.first() {
            Some(param) => param.parse().ok()?,
            None => 0.5,
        };
        let screen_direction = match params.get(1) {
            Some(param) => param.parse().ok()?,
            None => ScreenDirection::Outside,
        };
        Some(Self {
            main_ratio,
            screen_direction,
        })
    }

    pub fn split_orientation(&self, count: usize) -> Option<Orientation> {
        if count < 2 {
            None
        } else if count % 2 == 0 {
            Some(Orientation::Horizontal)
        } else {
            Some(Orientation::Vertical)
        }
    }

    pub fn arrange(&self, ctx: &mut Context, count: usize) {
        // Spiralling inward walks every second window one step back toward
        // the screen center before it is sized.
        if self.screen_direction == ScreenDirection::Inside {
            if count % 4 == 0 {
                ctx.exec("move left");
            } else if count % 4 == 1 && count > 1 {
                ctx.exec("move up");
            }
        }
        if count % 2 == 1 {
            if count > 1 {
                let ratio = (1.0 - self.main_ratio).powi((count as i32 - 1) / 2);
                let size = ctx.workspace_height(ratio);
                ctx.exec(&format!("resize set height {size}"));
            }
        } else {
            let ratio = (1.0 - self.main_ratio).powi(count as i32 / 2);
            let size = ctx.workspace_width(ratio);
            ctx.exec(&format!("resize set width {size}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_axis_alternates_with_parity() {
        let spiral = Spiral::default();
        assert_eq!(spiral.split_orientation(1), None);
        assert_eq!(spiral.split_orientation(2), Some(Orientation::Horizontal));
        assert_eq!(spiral.split_orientation(3), Some(Orientation::Vertical));
        assert_eq!(spiral.split_orientation(4), Some(Orientation::Horizontal));
    }

    #[test]
    fn malformed_parameters_fall_back_to_defaults() {
        let params = vec!["0.6".to_string(), "diagonal".to_string()];
        assert_eq!(Spiral::from_params(&params), Spiral::default());
    }
}
