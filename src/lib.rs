//! Interactive resize and move for elements on a page-builder canvas.
//!
//! Elements get eight resize handles and, once selected, a draggable body.
//! A drag is an explicit session: it snapshots the element's rendered box at
//! pointer-down, computes a live preview on every pointer-move, and delivers
//! exactly one commit at pointer-up. At most one session is open at a time,
//! and its document listeners are released however it ends.
//!
//! The geometry and session logic are plain Rust and fully testable; the
//! browser only appears behind the [`platform::Platform`] seam, implemented
//! for web-sys in [`dom`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | Event-level driver and the [`controller::Action`]s it emits |
//! | [`session`] | Session record and the single-slot session owner |
//! | [`resize`] | Pure resize computation with aspect lock |
//! | [`position`] | Pure move computation |
//! | [`constraint`] | Min/max size bounds and per-axis clamping |
//! | [`handle`] | The eight resize handles and their directions |
//! | [`element`] | Element model and registry |
//! | [`selection`] | Edit mode and the active element |
//! | [`input`] | Pointer samples, buttons, keys, modifier tracking |
//! | [`geometry`] | Points, sizes, snapshots, CSS lengths |
//! | [`platform`] | Host seam: measuring and listener registration |
//! | [`dom`] | Browser platform and the `Manipulator` wasm export |
//! | [`config`] | Controller configuration |
//! | [`error`] | Error types |
//! | [`consts`] | Default bounds and cursor names |

pub mod config;
pub mod constraint;
pub mod consts;
pub mod controller;
pub mod dom;
pub mod element;
pub mod error;
pub mod geometry;
pub mod handle;
pub mod input;
pub mod platform;
pub mod position;
pub mod resize;
pub mod selection;
pub mod session;
