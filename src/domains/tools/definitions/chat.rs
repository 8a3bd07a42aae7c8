//! Chat controller: contacts, chats and message history.

use crate::api::HttpMethod;
use crate::domains::tools::catalog::{
    ExampleValue, OperationDescriptor, ParamType, ParameterDescriptor as P,
};

pub const OPERATIONS: &[OperationDescriptor] = &[
    OperationDescriptor {
        name: "check-whatsapp-numbers",
        group: "chat",
        path: "/chat/whatsappNumbers/{instance}",
        method: HttpMethod::Post,
        description: "Check which phone numbers have WhatsApp",
        parameters: &[
            P::instance(),
            P::body("numbers", ParamType::Array, "Phone numbers to check").required(),
        ],
    },
    OperationDescriptor {
        name: "mark-message-as-read",
        group: "chat",
        path: "/chat/markMessageAsRead/{instance}",
        method: HttpMethod::Post,
        description: "Mark messages as read",
        parameters: &[
            P::instance(),
            P::body("readMessages", ParamType::Array, "Message keys (remoteJid, fromMe, id)")
                .required(),
        ],
    },
    OperationDescriptor {
        name: "archive-chat",
        group: "chat",
        path: "/chat/archiveChat/{instance}",
        method: HttpMethod::Post,
        description: "Archive or unarchive a chat",
        parameters: &[
            P::instance(),
            P::body("chat", ParamType::String, "JID of the chat").required(),
            P::body("archive", ParamType::Boolean, "true to archive, false to unarchive")
                .required()
                .example(ExampleValue::Bool(true)),
            P::body("lastMessage", ParamType::Object, "Last message of the chat"),
        ],
    },
    OperationDescriptor {
        name: "delete-message",
        group: "chat",
        path: "/chat/deleteMessageForEveryone/{instance}",
        method: HttpMethod::Delete,
        description: "Delete a message for everyone",
        parameters: &[
            P::instance(),
            P::body("id", ParamType::String, "Message id").required(),
            P::body("remoteJid", ParamType::String, "JID of the chat").required(),
            P::body("fromMe", ParamType::Boolean, "Whether the message was sent by this instance")
                .required(),
            P::body("participant", ParamType::String, "Sender JID in group chats"),
        ],
    },
    OperationDescriptor {
        name: "fetch-profile-picture",
        group: "chat",
        path: "/chat/fetchProfilePictureUrl/{instance}",
        method: HttpMethod::Post,
        description: "Get the profile picture URL of a contact",
        parameters: &[
            P::instance(),
            P::body("number", ParamType::String, "Contact number or JID").required(),
        ],
    },
    OperationDescriptor {
        name: "find-contacts",
        group: "chat",
        path: "/chat/findContacts/{instance}",
        method: HttpMethod::Post,
        description: "Search the contacts of an instance",
        parameters: &[
            P::instance(),
            P::body("where", ParamType::Object, "Filter, e.g. {\"id\": \"<jid>\"}"),
        ],
    },
    OperationDescriptor {
        name: "find-messages",
        group: "chat",
        path: "/chat/findMessages/{instance}",
        method: HttpMethod::Post,
        description: "Search stored messages",
        parameters: &[
            P::instance(),
            P::body("where", ParamType::Object, "Filter, e.g. {\"key\": {\"remoteJid\": \"<jid>\"}}"),
            P::body("page", ParamType::Number, "Page number").example(ExampleValue::Int(1)),
            P::body("offset", ParamType::Number, "Page size").example(ExampleValue::Int(10)),
        ],
    },
    OperationDescriptor {
        name: "find-chats",
        group: "chat",
        path: "/chat/findChats/{instance}",
        method: HttpMethod::Post,
        description: "List the chats of an instance",
        parameters: &[P::instance()],
    },
    OperationDescriptor {
        name: "send-presence",
        group: "chat",
        path: "/chat/sendPresence/{instance}",
        method: HttpMethod::Post,
        description: "Show typing or recording presence in a chat",
        parameters: &[
            P::instance(),
            P::body("number", ParamType::String, "Chat number or JID").required(),
            P::body("presence", ParamType::String, "composing, recording or paused")
                .required()
                .example(ExampleValue::Str("composing")),
            P::body("delay", ParamType::Number, "How long to show the presence, in ms")
                .required(),
        ],
    },
    OperationDescriptor {
        name: "update-block-status",
        group: "chat",
        path: "/chat/updateBlockStatus/{instance}",
        method: HttpMethod::Post,
        description: "Block or unblock a contact",
        parameters: &[
            P::instance(),
            P::body("number", ParamType::String, "Contact number or JID").required(),
            P::body("status", ParamType::String, "block or unblock")
                .required()
                .example(ExampleValue::Str("block")),
        ],
    },
];
