#![allow(missing_docs)]
// Domain layer modules.
//
// Pure data + rules of the creation wizard. Nothing in here performs IO or
// knows about the loop, the executor or the collaborators; the reducer in
// `core` is the only caller that mutates these types.
//
// - draft:      form field store (draft record + field edits)
// - steps:      step list computation and cursor
// - validation: per-step gate
// - submission: single in-flight submission + redirect resolution
// - fixtures:   static users/groups/markets looked up by id

pub mod draft;
pub mod fixtures;
pub mod steps;
pub mod submission;
pub mod validation;
