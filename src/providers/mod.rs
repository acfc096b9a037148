//! Model providers
//!
//! Only Google Gemini is wired up; the submission handler talks to it through
//! the [`DescribeImage`](crate::traits::DescribeImage) trait.

pub mod gemini;
