//! Terminal toy box: flocking boids, Conway's Game of Life, minesweeper,
//! snake, a bubble sort visualiser and a seeded noise canvas, plus a
//! short-link store and a time-saved calculator.
//!
//! The engines under [`sim`] are plain state machines with no terminal
//! dependency; [`widgets`] wraps each one in a crossterm front-end.

pub mod colors;
pub mod config;
pub mod help;
pub mod links;
pub mod logging;
pub mod pace;
pub mod settings;
pub mod sim;
pub mod terminal;
pub mod widgets;
