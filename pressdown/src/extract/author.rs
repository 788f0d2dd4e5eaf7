//! Author record extraction.

use crate::error::ConvertError;
use crate::model::Author;
use crate::xml::Element;

/// One `Author` per `<author>` element in the channel, fields copied
/// verbatim. All four fields are part of the export's author schema, so a
/// missing one is an error naming it.
pub fn collect_authors(channel: &Element) -> Result<Vec<Author>, ConvertError> {
    channel
        .elements("author")
        .map(|author| {
            Ok(Author {
                login: author.require_text("author_login")?,
                first_name: author.require_text("author_first_name")?,
                last_name: author.require_text("author_last_name")?,
                email: author.require_text("author_email")?,
            })
        })
        .collect()
}
