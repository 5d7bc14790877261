//! Data transfer objects for the service layer

mod requests;
mod responses;

pub use requests::{AttachmentInput, CreateRoomRequest, SendMessageRequest};
pub use responses::{AttachmentResponse, MessageResponse, RoomResponse};
