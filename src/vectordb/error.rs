use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by neighbor index operations.
pub enum VectorDbError {
    /// Could not connect to the Qdrant endpoint.
    #[error("failed to connect to Qdrant at '{url}': {message}")]
    ConnectionFailed {
        /// Endpoint URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// Collection does not exist.
    #[error("collection not found: {collection}")]
    CollectionNotFound {
        /// Collection name.
        collection: String,
    },

    /// Search failed.
    #[error("failed to search in '{collection}': {message}")]
    SearchFailed {
        /// Collection name.
        collection: String,
        /// Error message.
        message: String,
    },

    /// A returned point could not be turned into a neighbor result.
    #[error("malformed neighbor result from '{collection}': {message}")]
    MalformedResult {
        /// Collection name.
        collection: String,
        /// Error message.
        message: String,
    },

    /// Identifier too short to carry a product id plus suffix.
    #[error("malformed neighbor identifier '{identifier}': expected a product id followed by a {suffix_len}-character suffix")]
    MalformedIdentifier {
        /// Raw identifier.
        identifier: String,
        /// Expected suffix length.
        suffix_len: usize,
    },

    /// Query vector was empty.
    #[error("query vector {index} is empty")]
    EmptyVector {
        /// Position of the vector in the request.
        index: usize,
    },
}
