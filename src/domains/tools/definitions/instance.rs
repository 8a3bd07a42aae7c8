//! Instance controller: lifecycle of WhatsApp connections.

use crate::api::HttpMethod;
use crate::domains::tools::catalog::{
    ExampleValue, OperationDescriptor, ParamType, ParameterDescriptor as P,
};

pub const OPERATIONS: &[OperationDescriptor] = &[
    OperationDescriptor {
        name: "create-instance",
        group: "instance",
        path: "/instance/create",
        method: HttpMethod::Post,
        description: "Create a new WhatsApp instance",
        parameters: &[
            P::body("instanceName", ParamType::String, "Unique name of the new instance").required(),
            P::body("token", ParamType::String, "Instance-specific API token"),
            P::body("number", ParamType::String, "Phone number used for pairing codes"),
            P::body("qrcode", ParamType::Boolean, "Return a QR code right away"),
            P::body("integration", ParamType::String, "Integration backend")
                .example(ExampleValue::Str("WHATSAPP-BAILEYS")),
        ],
    },
    OperationDescriptor {
        name: "fetch-instances",
        group: "instance",
        path: "/instance/fetchInstances",
        method: HttpMethod::Get,
        description: "List instances, optionally filtered by name",
        parameters: &[P::query("instanceName", ParamType::String, "Only return this instance")],
    },
    OperationDescriptor {
        name: "connect-instance",
        group: "instance",
        path: "/instance/connect/{instance}",
        method: HttpMethod::Get,
        description: "Connect an instance and return its QR code or pairing code",
        parameters: &[
            P::instance(),
            P::query("number", ParamType::String, "Phone number to receive a pairing code"),
        ],
    },
    OperationDescriptor {
        name: "restart-instance",
        group: "instance",
        path: "/instance/restart/{instance}",
        method: HttpMethod::Post,
        description: "Restart an instance",
        parameters: &[P::instance()],
    },
    OperationDescriptor {
        name: "connection-state",
        group: "instance",
        path: "/instance/connectionState/{instance}",
        method: HttpMethod::Get,
        description: "Get the connection state of an instance",
        parameters: &[P::instance()],
    },
    OperationDescriptor {
        name: "set-presence",
        group: "instance",
        path: "/instance/setPresence/{instance}",
        method: HttpMethod::Post,
        description: "Set the global presence of an instance",
        parameters: &[
            P::instance(),
            P::body("presence", ParamType::String, "available or unavailable")
                .required()
                .example(ExampleValue::Str("available")),
        ],
    },
    OperationDescriptor {
        name: "logout-instance",
        group: "instance",
        path: "/instance/logout/{instance}",
        method: HttpMethod::Delete,
        description: "Log an instance out of WhatsApp",
        parameters: &[P::instance()],
    },
    OperationDescriptor {
        name: "delete-instance",
        group: "instance",
        path: "/instance/delete/{instance}",
        method: HttpMethod::Delete,
        description: "Delete an instance",
        parameters: &[P::instance()],
    },
];
