// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod api;
pub mod auth;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod editor;
pub mod error;
pub mod markup;
pub mod models;
pub mod orchestrator;
pub mod profile;
pub mod state;
pub mod sync;
pub mod utils;
