//! Three-column layout: a two-region split until the third column opens,
//! then alternation between a bounded second column and an overflow third
//! column. Opening the third column recomputes widths from the live tree
//! and corrects them with signed pixel deltas, because the two-column
//! phase leaves absolute widths behind that no longer match the ratio.

use crate::context::Context;
use crate::models::{mark, HorizontalPosition, Orientation};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreeColumns {
    pub two_columns_main_ratio: f64,
    pub three_columns_main_ratio: f64,
    /// Second column capacity; 0 alternates by parity without bound.
    pub second_column_max: usize,
    pub second_column_position: HorizontalPosition,
}

impl Default for ThreeColumns {
    fn default() -> Self {
        Self {
            two_columns_main_ratio: 0.5,
            three_columns_main_ratio: 0.5,
            second_column_max: 0,
            second_column_position: HorizontalPosition::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Second,
    Third,
}

impl ThreeColumns {
    pub fn from_params(params: &[String]) -> Self {
        Self::try_from_params(params).unwrap_or_else(|| {
            tracing::warn!("invalid 3columns parameters {params:?}, using defaults");
            Self::default()
        })
    }

    fn try_from_params(params: &[String]) -> Option<Self> {
        let two_columns_main_ratio = match params.first() {
            Some(param) => param.parse().ok()?,
            None => 0.5,
        };
        let three_columns_main_ratio = match params.get(1) {
            Some(param) => param.parse().ok()?,
            None => 0.5,
        };
        let second_column_max = match params.get(2) {
            Some(param) => param.parse().ok()?,
            None => 0,
        };
        let second_column_position = match params.get(3) {
            Some(param) => param.parse().ok()?,
            None => HorizontalPosition::Left,
        };
        Some(Self {
            two_columns_main_ratio,
            three_columns_main_ratio,
            second_column_max,
            second_column_position,
        })
    }

    pub fn split_orientation(&self, _count: usize) -> Option<Orientation> {
        None
    }

    /// Insertion index at which the third column opens.
    fn third_column_index(&self) -> usize {
        if self.second_column_max == 0 {
            3
        } else {
            self.second_column_max + 2
        }
    }

    fn column_for(&self, count: usize) -> Column {
        let second = if self.second_column_max == 0 {
            count % 2 == 0
        } else {
            count <= self.second_column_max + 1
        };
        if second {
            Column::Second
        } else {
            Column::Third
        }
    }

    pub fn arrange(&self, ctx: &mut Context, count: usize) -> crate::Result<()> {
        if count < 2 {
            return Ok(());
        }
        self.move_to_column(ctx, self.column_for(count));

        let third_index = self.third_column_index();
        if count == 2 || count == third_index {
            ctx.exec("split vertical");
        }

        let workspace = ctx.workspace_name.clone();
        let main_mark = mark::main(&workspace);
        if count == 2 {
            let main_width = ctx.workspace_width(self.two_columns_main_ratio);
            ctx.exec(&format!(
                r#"[con_mark="{main_mark}"] resize set width {main_width}"#
            ));
        } else if count == third_index {
            self.rebalance_columns(ctx, &main_mark)?;
        }
        Ok(())
    }

    fn move_to_column(&self, ctx: &mut Context, column: Column) {
        let rightward = match column {
            Column::Second => self.second_column_position == HorizontalPosition::Right,
            Column::Third => self.second_column_position == HorizontalPosition::Left,
        };
        if rightward {
            ctx.exec("move right");
        } else {
            ctx.exec("move left");
            ctx.exec("move left");
        }
    }

    /// The two-column phase left the side columns with absolute widths
    /// that are wrong once there are three. Read the live widths and issue
    /// grow/shrink deltas so the main column lands on the ratio exactly.
    fn rebalance_columns(&self, ctx: &mut Context, main_mark: &str) -> crate::Result<()> {
        ctx.resync()?;
        let side_target = ctx.workspace_width((1.0 - self.three_columns_main_ratio) / 2.0);
        let side_delta = side_target - ctx.focused.rect.width;
        if side_delta != 0 {
            ctx.exec(&format!(
                "resize {} width {} px",
                grow_or_shrink(side_delta),
                side_delta.abs()
            ));
            // The freed width lands in the adjacent column, so the main
            // delta must come from the post-resize tree.
            ctx.resync()?;
        }
        if let Some(main) = ctx.find_marked(main_mark) {
            let main_delta = ctx.workspace_width(self.three_columns_main_ratio) - main.rect.width;
            if main_delta != 0 {
                ctx.exec(&format!(
                    r#"[con_mark="{main_mark}"] resize {} width {} px"#,
                    grow_or_shrink(main_delta),
                    main_delta.abs()
                ));
            }
        }
        Ok(())
    }
}

fn grow_or_shrink(delta: i32) -> &'static str {
    if delta > 0 {
        "grow"
    } else {
        "shrink"
    }
}
