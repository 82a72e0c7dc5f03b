//! Squad Micro - squad cohesion and unit targeting for an RTS agent
//!
//! Each tick every squad refreshes its members, decides whether it must stop
//! and regroup, and otherwise lets its role controllers pick targets and
//! issue attack or move commands through the engine boundary in [`world`].

pub mod core;
pub mod micro;
pub mod squad;
pub mod strategy;
pub mod world;
