//! Core模块 - 包含所有核心查询逻辑

pub mod models;
pub mod catalog;
pub mod synonyms;
pub mod normalizer;
pub mod search;
pub mod aggregate;
pub mod report;
pub mod service;
