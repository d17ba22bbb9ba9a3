//! Parameter vocabularies shared by the layout strategies and the mover.
//! Everything here round-trips through the command mini-language as plain
//! lowercase tokens.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => write!(f, "horizontal"),
            Orientation::Vertical => write!(f, "vertical"),
        }
    }
}

/// Side of the workspace a region is pinned to on the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalPosition {
    Left,
    Right,
}

impl fmt::Display for HorizontalPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HorizontalPosition::Left => write!(f, "left"),
            HorizontalPosition::Right => write!(f, "right"),
        }
    }
}

impl FromStr for HorizontalPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(HorizontalPosition::Left),
            "right" => Ok(HorizontalPosition::Right),
            other => Err(format!("unknown horizontal position: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalPosition {
    Up,
    Down,
}

impl fmt::Display for VerticalPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerticalPosition::Up => write!(f, "up"),
            VerticalPosition::Down => write!(f, "down"),
        }
    }
}

impl FromStr for VerticalPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(VerticalPosition::Up),
            "down" => Ok(VerticalPosition::Down),
            other => Err(format!("unknown vertical position: {other}")),
        }
    }
}

/// Companion placement: fixed above/below its paired window, or
/// alternating by pair parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanionPosition {
    Up,
    Down,
    AltUp,
    AltDown,
}

impl CompanionPosition {
    /// Resolve to a concrete vertical position for the given pair index
    /// (1-based).
    pub fn resolve(self, pair: usize) -> VerticalPosition {
        match self {
            CompanionPosition::Up => VerticalPosition::Up,
            CompanionPosition::Down => VerticalPosition::Down,
            CompanionPosition::AltUp => {
                if pair % 2 == 1 {
                    VerticalPosition::Up
                } else {
                    VerticalPosition::Down
                }
            }
            CompanionPosition::AltDown => {
                if pair % 2 == 1 {
                    VerticalPosition::Down
                } else {
                    VerticalPosition::Up
                }
            }
        }
    }
}

impl FromStr for CompanionPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(CompanionPosition::Up),
            "down" => Ok(CompanionPosition::Down),
            "alt-up" => Ok(CompanionPosition::AltUp),
            "alt-down" => Ok(CompanionPosition::AltDown),
            other => Err(format!("unknown companion position: {other}")),
        }
    }
}

/// Which way the newest window keeps spiralling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenDirection {
    Inside,
    Outside,
}

impl FromStr for ScreenDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inside" => Ok(ScreenDirection::Inside),
            "outside" => Ok(ScreenDirection::Outside),
            other => Err(format!("unknown screen direction: {other}")),
        }
    }
}

/// A direction as understood by the `move` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
    Up,
    Down,
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveDirection::Left => write!(f, "left"),
            MoveDirection::Right => write!(f, "right"),
            MoveDirection::Up => write!(f, "up"),
            MoveDirection::Down => write!(f, "down"),
        }
    }
}

impl FromStr for MoveDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(MoveDirection::Left),
            "right" => Ok(MoveDirection::Right),
            "up" => Ok(MoveDirection::Up),
            "down" => Ok(MoveDirection::Down),
            other => Err(format!("unknown move direction: {other}")),
        }
    }
}
