/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
/// Request execution over a pluggable transport
pub mod executor;
/// Request specs, header sets and request building
pub mod http;
/// Multipart upload encoding
pub mod multipart;
/// Request bodies sent to the API
pub mod requests;
