//! Room events published on the per-room stream

mod room_event;

pub use room_event::{
    AttachmentPayload, MemberAddedEvent, MemberRemovedEvent, MessageCreatedEvent, MessagePayload,
    RoomDeletedEvent, RoomEvent, RoomUpdatedEvent, TypingEvent,
};
