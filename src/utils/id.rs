const REQUEST_ID_ALPHABET: [char; 36] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

/// Length of the identifiers returned by [`request_id`]
pub const REQUEST_ID_LENGTH: usize = 12;

/// Generates a short identifier used to correlate the log lines of one request.
///
/// The identifier is composed of uppercase English letters (`A-Z`) and digits
/// (`0-9`) and is produced by the `nanoid` crate.
///
/// # Examples
/// ```
/// use copyleaks_client::utils::id::request_id;
/// let id = request_id();
/// assert_eq!(id.len(), 12);
/// ```
#[must_use]
pub fn request_id() -> String {
    nanoid::nanoid!(REQUEST_ID_LENGTH, &REQUEST_ID_ALPHABET)
}
