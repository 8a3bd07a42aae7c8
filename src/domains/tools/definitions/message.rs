//! Message controller: sending content to chats.

use crate::api::HttpMethod;
use crate::domains::tools::catalog::{
    ExampleValue, OperationDescriptor, ParamType, ParameterDescriptor as P,
};

const RECIPIENT: P = P::body("number", ParamType::String, "Recipient number or JID").required();
const DELAY: P = P::body("delay", ParamType::Number, "Delay in milliseconds before sending");
const QUOTED: P = P::body("quoted", ParamType::Object, "Message being replied to");

pub const OPERATIONS: &[OperationDescriptor] = &[
    OperationDescriptor {
        name: "send-text",
        group: "message",
        path: "/message/sendText/{instance}",
        method: HttpMethod::Post,
        description: "Send a text message",
        parameters: &[
            P::instance(),
            RECIPIENT,
            P::body("text", ParamType::String, "Message text").required(),
            DELAY,
            P::body("linkPreview", ParamType::Boolean, "Render a preview for the first link"),
            P::body("mentioned", ParamType::Array, "JIDs to mention"),
            QUOTED,
        ],
    },
    OperationDescriptor {
        name: "send-media",
        group: "message",
        path: "/message/sendMedia/{instance}",
        method: HttpMethod::Post,
        description: "Send an image, video or document",
        parameters: &[
            P::instance(),
            RECIPIENT,
            P::body("mediatype", ParamType::String, "image, video or document")
                .required()
                .example(ExampleValue::Str("image")),
            P::body("media", ParamType::String, "Media URL or base64 content")
                .required()
                .example(ExampleValue::Str("https://example.com/image.png")),
            P::body("mimetype", ParamType::String, "MIME type of the media")
                .example(ExampleValue::Str("image/png")),
            P::body("caption", ParamType::String, "Caption shown with the media"),
            P::body("fileName", ParamType::String, "File name for documents"),
            DELAY,
        ],
    },
    OperationDescriptor {
        name: "send-audio",
        group: "message",
        path: "/message/sendWhatsAppAudio/{instance}",
        method: HttpMethod::Post,
        description: "Send an audio message as a voice note",
        parameters: &[
            P::instance(),
            RECIPIENT,
            P::body("audio", ParamType::String, "Audio URL or base64 content")
                .required()
                .example(ExampleValue::Str("https://example.com/audio.mp3")),
            DELAY,
        ],
    },
    OperationDescriptor {
        name: "send-sticker",
        group: "message",
        path: "/message/sendSticker/{instance}",
        method: HttpMethod::Post,
        description: "Send a sticker",
        parameters: &[
            P::instance(),
            RECIPIENT,
            P::body("sticker", ParamType::String, "Sticker URL or base64 content").required(),
            DELAY,
        ],
    },
    OperationDescriptor {
        name: "send-location",
        group: "message",
        path: "/message/sendLocation/{instance}",
        method: HttpMethod::Post,
        description: "Send a location pin",
        parameters: &[
            P::instance(),
            RECIPIENT,
            P::body("name", ParamType::String, "Name of the place").required(),
            P::body("address", ParamType::String, "Street address").required(),
            P::body("latitude", ParamType::Number, "Latitude")
                .required()
                .example(ExampleValue::Float(-23.5505)),
            P::body("longitude", ParamType::Number, "Longitude")
                .required()
                .example(ExampleValue::Float(-46.6333)),
            DELAY,
        ],
    },
    OperationDescriptor {
        name: "send-contact",
        group: "message",
        path: "/message/sendContact/{instance}",
        method: HttpMethod::Post,
        description: "Send one or more contact cards",
        parameters: &[
            P::instance(),
            RECIPIENT,
            P::body("contact", ParamType::Array, "Contacts with fullName, wuid and phoneNumber")
                .required(),
        ],
    },
    OperationDescriptor {
        name: "send-reaction",
        group: "message",
        path: "/message/sendReaction/{instance}",
        method: HttpMethod::Post,
        description: "React to a message with an emoji",
        parameters: &[
            P::instance(),
            P::body("key", ParamType::Object, "Key of the message (remoteJid, fromMe, id)")
                .required(),
            P::body("reaction", ParamType::String, "Emoji; empty to remove the reaction")
                .required()
                .example(ExampleValue::Str("👍")),
        ],
    },
    OperationDescriptor {
        name: "send-poll",
        group: "message",
        path: "/message/sendPoll/{instance}",
        method: HttpMethod::Post,
        description: "Send a poll",
        parameters: &[
            P::instance(),
            RECIPIENT,
            P::body("name", ParamType::String, "Poll question").required(),
            P::body("selectableCount", ParamType::Number, "How many options may be chosen")
                .required()
                .example(ExampleValue::Int(1)),
            P::body("values", ParamType::Array, "Poll options").required(),
            DELAY,
        ],
    },
    OperationDescriptor {
        name: "send-list",
        group: "message",
        path: "/message/sendList/{instance}",
        method: HttpMethod::Post,
        description: "Send an interactive list message",
        parameters: &[
            P::instance(),
            RECIPIENT,
            P::body("title", ParamType::String, "List title").required(),
            P::body("description", ParamType::String, "List description").required(),
            P::body("buttonText", ParamType::String, "Text of the button opening the list")
                .required(),
            P::body("footerText", ParamType::String, "Footer text"),
            P::body("sections", ParamType::Array, "Sections with their rows").required(),
            DELAY,
        ],
    },
    OperationDescriptor {
        name: "send-status",
        group: "message",
        path: "/message/sendStatus/{instance}",
        method: HttpMethod::Post,
        description: "Post a status update",
        parameters: &[
            P::instance(),
            P::body("type", ParamType::String, "text, image, video or audio")
                .required()
                .example(ExampleValue::Str("text")),
            P::body("content", ParamType::String, "Text or media URL").required(),
            P::body("caption", ParamType::String, "Caption for media statuses"),
            P::body("backgroundColor", ParamType::String, "Background color for text statuses"),
            P::body("allContacts", ParamType::Boolean, "Send to every contact"),
            P::body("statusJidList", ParamType::Array, "Recipients when not sending to all"),
        ],
    },
];
