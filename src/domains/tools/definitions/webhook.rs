//! Webhook controller: event delivery to external URLs.

use crate::api::HttpMethod;
use crate::domains::tools::catalog::{OperationDescriptor, ParamType, ParameterDescriptor as P};

pub const OPERATIONS: &[OperationDescriptor] = &[
    OperationDescriptor {
        name: "set-webhook",
        group: "webhook",
        path: "/webhook/set/{instance}",
        method: HttpMethod::Post,
        description: "Configure the webhook of an instance",
        parameters: &[
            P::instance(),
            P::body("webhook", ParamType::Object, "Webhook settings: enabled, url, byEvents, base64, events")
                .required(),
        ],
    },
    OperationDescriptor {
        name: "find-webhook",
        group: "webhook",
        path: "/webhook/find/{instance}",
        method: HttpMethod::Get,
        description: "Get the webhook configuration of an instance",
        parameters: &[P::instance()],
    },
];

/// Events accepted in the `webhook.events` list.
pub const EVENTS: &[&str] = &[
    "APPLICATION_STARTUP",
    "QRCODE_UPDATED",
    "CONNECTION_UPDATE",
    "MESSAGES_SET",
    "MESSAGES_UPSERT",
    "MESSAGES_UPDATE",
    "MESSAGES_DELETE",
    "SEND_MESSAGE",
    "CONTACTS_UPSERT",
    "CHATS_UPSERT",
    "GROUPS_UPSERT",
    "GROUP_PARTICIPANTS_UPDATE",
    "PRESENCE_UPDATE",
    "CALL",
];
