pub mod xdo;
