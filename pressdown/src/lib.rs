//! WordPress export (WXR) to Markdown conversion
//!
//!     This crate turns a WordPress content export into a normalized document
//!     model (posts + authors) and translates each post's embedded HTML body
//!     into Markdown suitable for static-site generators.
//!
//!     TLDR for integrators:
//!         - Feed the raw export text and a ConvertOptions to pipeline::convert_export.
//!         - You get back (Vec<Post>, Vec<Author>). Post carries the frontmatter
//!           fields, the translated excerpt/content Markdown, and the list of
//!           image URLs your writer needs to download.
//!         - This is a pure lib. It powers an external CLI/writer shell but is
//!           shell agnostic: no prompting, no output files, no HTTP. Progress
//!           counts go through the `log` facade and can be redirected or dropped.
//!
//! Architecture
//!
//!     Data flows strictly forward, each stage a pure function of the previous
//!     one:
//!
//!     ingestion (xml) → extraction (extract) → association (associate)
//!         → per-post translation (translate) → pipeline output
//!
//!     The file structure:
//!     .
//!     ├── error.rs            # ConvertError
//!     ├── config.rs           # ConvertOptions, the configuration contract
//!     ├── model.rs            # Post / Author / Image records
//!     ├── urls.rs             # image extension + filename helpers
//!     ├── xml/                # export ingestion into an owned tagged tree
//!     ├── extract/            # post / author / image extractors + dates
//!     ├── associate.rs        # image ↔ post linking
//!     ├── translate/          # the HTML → Markdown engine
//!     └── pipeline.rs         # orchestration, the public entry point
//!
//! The hard part
//!
//!     The export format is externally defined, loosely structured and
//!     attribute driven. Most of the care in this crate goes into two places:
//!
//!     - the extractors, which must behave sensibly across edge cases
//!       (multiple categories per taxonomy domain, missing optional fields,
//!       duplicate image references, entities inside titles), degrading to
//!       absent values per field instead of failing a whole post;
//!     - the content translator, which must preserve embedded rich content
//!       (tweets, codepens, loader scripts, iframes, code blocks) that a
//!       naive converter destroys. See translate/rules.rs for the
//!       preservation rule list.
//!
//! Library Choices
//!
//!     Not being anyone's core format, we offload as much as possible to the
//!     specialized crates: roxmltree parses the export, html5ever parses the
//!     bodies, comrak serializes the Markdown. This crate only writes the
//!     adapters between those ASTs, never a parser or serializer of its own.
//!     Translation output is deterministic: same fragment and options, same
//!     bytes out.

pub mod associate;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod pipeline;
pub mod translate;
pub mod urls;
pub mod xml;

pub use config::ConvertOptions;
pub use error::ConvertError;
pub use model::{Author, Image, Post};
pub use pipeline::{convert_export, convert_export_file};
pub use translate::{TranslateOptions, Translator};
