//! The two-region stack layouts.
//!
//! One main region keeps `main_ratio` of the workspace; every further
//! window stacks along the orthogonal axis in the remaining region. The
//! only resize ever issued is for the second window, when the stack region
//! is carved out; after that the tree splits do all the work.

use crate::context::Context;
use crate::models::{HorizontalPosition, Orientation, VerticalPosition};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VStack {
    pub main_ratio: f64,
    pub position: HorizontalPosition,
}

impl Default for VStack {
    fn default() -> Self {
        Self {
            main_ratio: 0.5,
            position: HorizontalPosition::Right,
        }
    }
}

impl VStack {
    pub fn from_params(params: &[String]) -> Self {
        Self::try_from_params(params).unwrap_or_else(|| {
            tracing::warn!("invalid vstack parameters {params:?}, using defaults");
            Self::default()
        })
    }

    fn try_from_params(params: &[String]) -> Option<Self> {
        let main_ratio = match params.first() {
            Some(param) => param.parse().ok()?,
            None => 0.5,
        };
        let position = match params.get(1) {
            Some(param) => param.parse().ok()?,
            None => HorizontalPosition::Right,
        };
        Some(Self {
            main_ratio,
            position,
        })
    }

    /// The second insertion carves the stack region off the main one; the
    /// third opens the stack axis inside that region.
    pub fn split_orientation(&self, count: usize) -> Option<Orientation> {
        match count {
            2 => Some(Orientation::Horizontal),
            3 => Some(Orientation::Vertical),
            _ => None,
        }
    }

    pub fn stack_orientation(&self, count: usize) -> Option<Orientation> {
        (count >= 4).then_some(Orientation::Vertical)
    }

    pub fn arrange(&self, ctx: &mut Context, count: usize) {
        if count == 2 {
            ctx.exec(&format!("move {}", self.position));
            let size = ctx.workspace_width(1.0 - self.main_ratio);
            ctx.exec(&format!("resize set width {size}"));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HStack {
    pub main_ratio: f64,
    pub position: VerticalPosition,
}

impl Default for HStack {
    fn default() -> Self {
        Self {
            main_ratio: 0.5,
            position: VerticalPosition::Up,
        }
    }
}

impl HStack {
    pub fn from_params(params: &[String]) -> Self {
        Self::try_from_params(params).unwrap_or_else(|| {
            tracing::warn!("invalid hstack parameters {params:?}, using defaults");
            Self::default()
        })
    }

    fn try_from_params(params: &[String]) -> Option<Self> {
        let main_ratio = match params.first() {
            Some(param) => param.parse().ok()?,
            None => 0.5,
        };
        let position = match params.get(1) {
            Some(param) => param.parse().ok()?,
            None => VerticalPosition::Up,
        };
        Some(Self {
            main_ratio,
            position,
        })
    }

    pub fn split_orientation(&self, count: usize) -> Option<Orientation> {
        match count {
            2 => Some(Orientation::Vertical),
            3 => Some(Orientation::Horizontal),
            _ => None,
        }
    }

    pub fn stack_orientation(&self, count: usize) -> Option<Orientation> {
        (count >= 4).then_some(Orientation::Horizontal)
    }

    pub fn arrange(&self, ctx: &mut Context, count: usize) {
        if count == 2 {
            ctx.exec(&format!("move {}", self.position));
            let size = ctx.workspace_height(1.0 - self.main_ratio);
            ctx.exec(&format!("resize set height {size}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| (*t).to_string()).collect()
    }

    #[test]
    fn vstack_parses_ratio_and_position() {
        let layout = VStack::from_params(&params(&["0.6", "left"]));
        assert_eq!(layout.main_ratio, 0.6);
        assert_eq!(layout.position, HorizontalPosition::Left);
    }

    #[test]
    fn malformed_parameters_fall_back_to_defaults() {
        assert_eq!(VStack::from_params(&params(&["abc"])), VStack::default());
        assert_eq!(VStack::from_params(&params(&["0.6", "upward"])), VStack::default());
        assert_eq!(HStack::from_params(&params(&["abc"])), HStack::default());
    }

    #[test]
    fn orientations_by_count() {
        let vstack = VStack::default();
        assert_eq!(vstack.split_orientation(1), None);
        assert_eq!(vstack.split_orientation(2), Some(Orientation::Horizontal));
        assert_eq!(vstack.split_orientation(3), Some(Orientation::Vertical));
        assert_eq!(vstack.split_orientation(4), None);
        assert_eq!(vstack.stack_orientation(3), None);
        assert_eq!(vstack.stack_orientation(5), Some(Orientation::Vertical));

        let hstack = HStack::default();
        assert_eq!(hstack.split_orientation(2), Some(Orientation::Vertical));
        assert_eq!(hstack.split_orientation(3), Some(Orientation::Horizontal));
        assert_eq!(hstack.stack_orientation(4), Some(Orientation::Horizontal));
    }
}
