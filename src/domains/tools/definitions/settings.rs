//! Settings controller: per-instance behaviour flags.

use crate::api::HttpMethod;
use crate::domains::tools::catalog::{OperationDescriptor, ParamType, ParameterDescriptor as P};

pub const OPERATIONS: &[OperationDescriptor] = &[
    OperationDescriptor {
        name: "set-settings",
        group: "settings",
        path: "/settings/set/{instance}",
        method: HttpMethod::Post,
        description: "Update the behaviour settings of an instance",
        parameters: &[
            P::instance(),
            P::body("rejectCall", ParamType::Boolean, "Reject incoming calls").required(),
            P::body("msgCall", ParamType::String, "Reply sent when a call is rejected"),
            P::body("groupsIgnore", ParamType::Boolean, "Ignore group messages").required(),
            P::body("alwaysOnline", ParamType::Boolean, "Always appear online").required(),
            P::body("readMessages", ParamType::Boolean, "Mark messages as read").required(),
            P::body("readStatus", ParamType::Boolean, "Mark statuses as seen").required(),
            P::body("syncFullHistory", ParamType::Boolean, "Sync the full history").required(),
        ],
    },
    OperationDescriptor {
        name: "find-settings",
        group: "settings",
        path: "/settings/find/{instance}",
        method: HttpMethod::Get,
        description: "Get the behaviour settings of an instance",
        parameters: &[P::instance()],
    },
];
