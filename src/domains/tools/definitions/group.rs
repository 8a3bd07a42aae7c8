//! Group controller: WhatsApp group management.

use crate::api::HttpMethod;
use crate::domains::tools::catalog::{
    ExampleValue, OperationDescriptor, ParamType, ParameterDescriptor as P,
};

const GROUP_JID: P = P::query("groupJid", ParamType::String, "JID of the group")
    .required()
    .example(ExampleValue::Str("120363000000000000@g.us"));

pub const OPERATIONS: &[OperationDescriptor] = &[
    OperationDescriptor {
        name: "create-group",
        group: "group",
        path: "/group/create/{instance}",
        method: HttpMethod::Post,
        description: "Create a group",
        parameters: &[
            P::instance(),
            P::body("subject", ParamType::String, "Group name").required(),
            P::body("description", ParamType::String, "Group description"),
            P::body("participants", ParamType::Array, "Phone numbers to add").required(),
        ],
    },
    OperationDescriptor {
        name: "fetch-all-groups",
        group: "group",
        path: "/group/fetchAllGroups/{instance}",
        method: HttpMethod::Get,
        description: "List every group the instance belongs to",
        parameters: &[
            P::instance(),
            P::query("getParticipants", ParamType::Boolean, "Include participants")
                .required()
                .example(ExampleValue::Bool(false)),
        ],
    },
    OperationDescriptor {
        name: "find-group-info",
        group: "group",
        path: "/group/findGroupInfos/{instance}",
        method: HttpMethod::Get,
        description: "Get the details of a group",
        parameters: &[P::instance(), GROUP_JID],
    },
    OperationDescriptor {
        name: "group-participants",
        group: "group",
        path: "/group/participants/{instance}",
        method: HttpMethod::Get,
        description: "List the participants of a group",
        parameters: &[P::instance(), GROUP_JID],
    },
    OperationDescriptor {
        name: "invite-code",
        group: "group",
        path: "/group/inviteCode/{instance}",
        method: HttpMethod::Get,
        description: "Get the invite code of a group",
        parameters: &[P::instance(), GROUP_JID],
    },
    OperationDescriptor {
        name: "update-group-subject",
        group: "group",
        path: "/group/updateGroupSubject/{instance}",
        method: HttpMethod::Post,
        description: "Rename a group",
        parameters: &[
            P::instance(),
            GROUP_JID,
            P::body("subject", ParamType::String, "New group name").required(),
        ],
    },
    OperationDescriptor {
        name: "update-participant",
        group: "group",
        path: "/group/updateParticipant/{instance}",
        method: HttpMethod::Post,
        description: "Add, remove, promote or demote group participants",
        parameters: &[
            P::instance(),
            GROUP_JID,
            P::body("action", ParamType::String, "add, remove, promote or demote")
                .required()
                .example(ExampleValue::Str("add")),
            P::body("participants", ParamType::Array, "Phone numbers affected").required(),
        ],
    },
    OperationDescriptor {
        name: "leave-group",
        group: "group",
        path: "/group/leaveGroup/{instance}",
        method: HttpMethod::Delete,
        description: "Leave a group",
        parameters: &[P::instance(), GROUP_JID],
    },
];
