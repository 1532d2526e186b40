//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar`: top status bar with topic, model, status and spinner
//! - `Message`: a single chat turn
//! - `LandingPage`: the panel shown before a session starts
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that own local state and emit events:
//! - `InputBox`: single-line text field (API key and chat input)
//! - `MessageList`: scrollable conversation with layout caching
//! - `AssignmentPanel`: scrollable practice assignment
//!
//! Components receive external data as props, never by reaching into
//! `Tutor` themselves.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs     (Top status bar)
//! ├── landing.rs       (Idle panel)
//! ├── message.rs       (Single message renderer)
//! ├── message_list.rs  (Scrollable message container)
//! ├── assignment.rs    (Practice assignment panel)
//! └── input_box/       (Text input)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod assignment;
pub mod input_box;
pub mod landing;
pub mod message;
pub mod message_list;

pub use assignment::{AssignmentPanel, AssignmentState};
pub use input_box::{InputBox, InputEvent};
pub use landing::LandingPage;
pub use message_list::{MessageList, MessageListState};
