pub mod bootstrap;
pub mod config;
pub mod controller;
pub mod export;
pub mod lexicon;
pub mod loader;
pub mod logging;
pub mod play;
pub mod random;
