//! Two-column layout: insertions alternate between the columns, each new
//! window reattaching below the visually bottommost window of its column.

use crate::context::Context;
use crate::models::{Container, Corners, HorizontalPosition, Orientation};
use crate::mover;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoColumns {
    /// Side the first column sits on.
    pub position: HorizontalPosition,
}

impl Default for TwoColumns {
    fn default() -> Self {
        Self {
            position: HorizontalPosition::Left,
        }
    }
}

impl TwoColumns {
    pub fn from_params(params: &[String]) -> Self {
        Self::try_from_params(params).unwrap_or_else(|| {
            tracing::warn!("invalid 2columns parameters {params:?}, using defaults");
            Self::default()
        })
    }

    fn try_from_params(params: &[String]) -> Option<Self> {
        let position = match params.first() {
            Some(param) => param.parse().ok()?,
            None => HorizontalPosition::Left,
        };
        Some(Self { position })
    }

    pub fn split_orientation(&self, count: usize) -> Option<Orientation> {
        (count == 2).then_some(Orientation::Horizontal)
    }

    pub fn arrange(&self, ctx: &mut Context, new: &Container, count: usize) {
        match count {
            0 | 1 => {}
            2 => {
                if self.position == HorizontalPosition::Right {
                    ctx.exec("move left");
                }
            }
            _ => self.attach_to_column(ctx, new, count),
        }
    }

    /// Send the new window below the bottom of its target column. The
    /// column is located by scanning the rectangles of the windows already
    /// in place, so the new window itself must be excluded.
    fn attach_to_column(&self, ctx: &mut Context, new: &Container, count: usize) {
        let settled: Vec<Container> = ctx
            .containers
            .iter()
            .filter(|container| container.id != new.id)
            .cloned()
            .collect();
        let corners = Corners::new(&settled);
        let first_column = count % 2 == 1;
        let column_x = if first_column == (self.position == HorizontalPosition::Left) {
            corners.left
        } else {
            corners.xs.last().copied().unwrap_or(corners.left)
        };
        let Some(bottom) = corners.bottom_of_column(column_x) else {
            return;
        };
        let bottom_id = bottom.id;
        if corners.column_len(column_x) == 1 {
            ctx.exec(&format!(r#"[con_id="{bottom_id}"] split vertical"#));
        }
        mover::move_to_container(ctx, bottom_id, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_second_window_splits() {
        let layout = TwoColumns::default();
        assert_eq!(layout.split_orientation(2), Some(Orientation::Horizontal));
        assert_eq!(layout.split_orientation(3), None);
    }

    #[test]
    fn malformed_position_falls_back_to_left() {
        let params = vec!["middle".to_string()];
        assert_eq!(TwoColumns::from_params(&params), TwoColumns::default());
    }
}
