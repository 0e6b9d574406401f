// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod admin;
mod category_tree;
mod error;
mod history;
mod moderation;
mod pagination;
mod sampler;
mod store;

#[cfg(test)]
mod tests;

pub use admin::{create_category, rename_category, reparent_category};
pub use category_tree::{
    CategoryNode, FlatCategory, build_tree, expand_to_descendants, flatten, validate_parent,
};
pub use error::CoreError;
pub use history::HistoryStore;
pub use moderation::{PendingUpdate, approve, reject, submit, update_pending};
pub use pagination::{Page, PageRequest, paginate, query_questions};
pub use sampler::{DeliveredQuestion, SampleRequest, SampledSet, sample};
pub use store::{InMemoryStore, QuestionFilter, QuestionStore, StoreError};
