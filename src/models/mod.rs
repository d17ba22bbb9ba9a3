mod container;
mod corners;
mod ledger;
pub mod mark;
mod options;
mod rect;

pub use container::Container;
pub use corners::Corners;
pub use ledger::{WorkspaceLedger, FROM_START};
pub use options::{
    CompanionPosition, HorizontalPosition, MoveDirection, Orientation, ScreenDirection,
    VerticalPosition,
};
pub use rect::Rect;
