//! Profile controller: the instance's own WhatsApp profile.

use crate::api::HttpMethod;
use crate::domains::tools::catalog::{
    ExampleValue, OperationDescriptor, ParamType, ParameterDescriptor as P,
};

pub const OPERATIONS: &[OperationDescriptor] = &[
    OperationDescriptor {
        name: "fetch-profile",
        group: "profile",
        path: "/chat/fetchProfile/{instance}",
        method: HttpMethod::Post,
        description: "Get the profile of a contact or of the instance",
        parameters: &[
            P::instance(),
            P::body("number", ParamType::String, "Contact number or JID").required(),
        ],
    },
    OperationDescriptor {
        name: "update-profile-name",
        group: "profile",
        path: "/chat/updateProfileName/{instance}",
        method: HttpMethod::Post,
        description: "Change the profile name",
        parameters: &[
            P::instance(),
            P::body("name", ParamType::String, "New profile name").required(),
        ],
    },
    OperationDescriptor {
        name: "update-profile-status",
        group: "profile",
        path: "/chat/updateProfileStatus/{instance}",
        method: HttpMethod::Post,
        description: "Change the profile status text",
        parameters: &[
            P::instance(),
            P::body("status", ParamType::String, "New status text")
                .required()
                .example(ExampleValue::Str("Available")),
        ],
    },
    OperationDescriptor {
        name: "update-profile-picture",
        group: "profile",
        path: "/chat/updateProfilePicture/{instance}",
        method: HttpMethod::Post,
        description: "Change the profile picture",
        parameters: &[
            P::instance(),
            P::body("picture", ParamType::String, "Image URL or base64 content")
                .required()
                .example(ExampleValue::Str("https://example.com/avatar.png")),
        ],
    },
    OperationDescriptor {
        name: "fetch-privacy-settings",
        group: "profile",
        path: "/chat/fetchPrivacySettings/{instance}",
        method: HttpMethod::Get,
        description: "Get the privacy settings of the instance",
        parameters: &[P::instance()],
    },
];
