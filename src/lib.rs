#![forbid(unsafe_code)]
//! # qrcraft
//!
//! Build QR code payloads from typed content profiles and render them as
//! images.
//!
//! A profile is one kind of content (link, Wi-Fi credentials, contact card,
//! calendar event, ...). `qrcraft` keeps the fields of every profile side by
//! side, turns the active one into the exact string scanning apps expect
//! (`WIFI:S:...;;`, `mailto:`, `SMSTO:`, `geo:`, vCard 3.0, iCalendar) and
//! renders it to an RGBA image with custom colors, an optional centered logo
//! and an optional textured preview backdrop.
//!
//! ## Features
//!
//! - Sixteen profiles, each with independent field storage.
//! - Per-profile validation with user-facing messages.
//! - Calendar times converted from local time to UTC.
//! - PNG, SVG and terminal output; transparent backgrounds.
//! - Logo loading in the background, composited once the code is rendered.
//!
//! ## Example
//!
//! Encode a Wi-Fi network and render it:
//!
//! ```rust
//! use qrcraft::encoder::encode;
//! use qrcraft::helper::{render, RenderOptions};
//! use qrcraft::store::ProfileStore;
//! use qrcraft::profile::ProfileKind;
//!
//! let mut store = ProfileStore::new();
//! store.set_active_profile(ProfileKind::Wifi);
//! store.set_field(ProfileKind::Wifi, "ssid", "Home").unwrap();
//! store.set_field(ProfileKind::Wifi, "password", "secret").unwrap();
//!
//! let payload = encode(store.active(), store.fields()).unwrap();
//! assert_eq!(payload, "WIFI:S:Home;T:WPA;P:secret;;");
//!
//! let image = render(&payload, &RenderOptions::default()).unwrap();
//! assert_eq!(image.dimensions(), (256, 256));
//! ```
//!
//! ## Modules
//!
//! - [`profile`] and [`store`]: profiles, field records and the editing state.
//! - [`encoder`]: payload encoding and validation.
//! - [`symbol`] and [`helper`]: QR matrix generation and rendering.
//! - [`compose`] and [`logo`]: logo overlay, textures and async logo loading.
//! - [`session`]: command-driven session tying everything together.
//! - [`config`]: TOML configuration.

pub mod color;
pub mod compose;
pub mod config;
pub mod encoder;
pub mod error;
pub mod helper;
pub mod logo;
pub mod profile;
pub mod session;
pub mod store;
pub mod symbol;
