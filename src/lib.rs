//! Single-choice quiz with answers that survive restarts.
//!
//! [`quiz::manager::QuizManager`] ties together the question set, the
//! persisted attempt ([`quiz::state::QuizState`] over a
//! [`storage::KeyValueStore`]) and a [`render::Renderer`].

pub mod config;
pub mod quiz;
pub mod render;
pub mod storage;
