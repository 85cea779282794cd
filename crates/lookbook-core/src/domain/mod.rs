//! Domain entities - the core business objects.

mod document;
mod filename;
mod post;
mod records;

pub use document::{
    PostDocument, decode_document, encode_document, format_timestamp, from_document,
    parse_timestamp, to_document,
};
pub use filename::{
    DOCUMENT_EXTENSION, FilenameKind, FilenameStyle, derive_filename, derive_filename_with,
    normalize_slug, parse_filename,
};
pub use post::{
    DEFAULT_FEATURED, DEFAULT_LOCATION, DEFAULT_READ_TIME, Neighbours, NewPost, Post,
    PostDefaults, PostId, PostSummary,
};
pub use records::{
    Comment, ContactSubmission, GalleryImage, NewComment, NewContactSubmission,
    NewGalleryImage, NewSubscriber, Record, RecordId, Subscriber,
};
