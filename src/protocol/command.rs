// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Patchbay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Patchbay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::Value;

use crate::model::{Rect, VarName};

/// Box types whose init arguments double as displayed content, delivered via
/// a `set` message right after creation.
const SET_ON_CREATE: &[&str] = &["message", "comment", "flonum"];

/// Structural edit intent relayed to the host as one-way `script` messages.
///
/// Commands are fire-and-forget: no confirmation is produced, any observable
/// result is picked up only by a subsequent read query.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    NewObject {
        varname: VarName,
        maxclass: String,
        rect: Rect,
        args: Vec<String>,
    },
    Delete {
        varname: VarName,
    },
    Connect {
        source: VarName,
        outlet: u32,
        destination: VarName,
        inlet: u32,
    },
    Disconnect {
        source: VarName,
        outlet: u32,
        destination: VarName,
        inlet: u32,
    },
    SetAttribute {
        varname: VarName,
        name: String,
        value: Value,
    },
    SetText {
        varname: VarName,
        text: String,
    },
    SendMessage {
        varname: VarName,
        message: String,
    },
    SendBang {
        varname: VarName,
    },
    SetNumber {
        varname: VarName,
        value: f64,
    },
}

impl HostCommand {
    /// Token sequences to emit as `script` messages, in order.
    ///
    /// Creation expands to several messages: the `new` itself, a `sendbox`
    /// placing the patching rectangle, and for content-bearing box types a
    /// `set` carrying the init arguments.
    pub fn script_messages(&self) -> Vec<Vec<Value>> {
        match self {
            Self::NewObject { varname, maxclass, rect, args } => {
                let mut new_tokens = vec![
                    Value::from("new"),
                    Value::from(varname.as_str()),
                    Value::from(maxclass.as_str()),
                ];
                new_tokens.extend(args.iter().map(|arg| Value::from(arg.as_str())));

                let [left, top, right, bottom] = rect.edges();
                let sendbox_tokens = vec![
                    Value::from("sendbox"),
                    Value::from(varname.as_str()),
                    Value::from("patching_rect"),
                    Value::from(left),
                    Value::from(top),
                    Value::from(right),
                    Value::from(bottom),
                ];

                let mut messages = vec![new_tokens, sendbox_tokens];
                if SET_ON_CREATE.contains(&maxclass.as_str()) {
                    let mut set_tokens = vec![
                        Value::from("send"),
                        Value::from(varname.as_str()),
                        Value::from("set"),
                    ];
                    set_tokens.extend(args.iter().map(|arg| Value::from(arg.as_str())));
                    messages.push(set_tokens);
                }
                messages
            }
            Self::Delete { varname } => {
                vec![vec![Value::from("delete"), Value::from(varname.as_str())]]
            }
            Self::Connect { source, outlet, destination, inlet } => vec![vec![
                Value::from("connect"),
                Value::from(source.as_str()),
                Value::from(*outlet),
                Value::from(destination.as_str()),
                Value::from(*inlet),
            ]],
            Self::Disconnect { source, outlet, destination, inlet } => vec![vec![
                Value::from("disconnect"),
                Value::from(source.as_str()),
                Value::from(*outlet),
                Value::from(destination.as_str()),
                Value::from(*inlet),
            ]],
            Self::SetAttribute { varname, name, value } => vec![vec![
                Value::from("sendbox"),
                Value::from(varname.as_str()),
                Value::from(name.as_str()),
                value.clone(),
            ]],
            Self::SetText { varname, text } => vec![vec![
                Value::from("send"),
                Value::from(varname.as_str()),
                Value::from("set"),
                Value::from(text.as_str()),
            ]],
            Self::SendMessage { varname, message } => vec![vec![
                Value::from("send"),
                Value::from(varname.as_str()),
                Value::from(message.as_str()),
            ]],
            Self::SendBang { varname } => vec![vec![
                Value::from("send"),
                Value::from(varname.as_str()),
                Value::from("bang"),
            ]],
            Self::SetNumber { varname, value } => vec![vec![
                Value::from("send"),
                Value::from(varname.as_str()),
                Value::from("set"),
                Value::from(*value),
            ]],
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::HostCommand;
    use crate::model::{Rect, VarName};

    fn varname(name: &str) -> VarName {
        VarName::new(name).expect("varname")
    }

    #[test]
    fn new_object_emits_new_and_rect_placement() {
        let command = HostCommand::NewObject {
            varname: varname("osc_1"),
            maxclass: "cycle~".to_owned(),
            rect: Rect::at(10.0, 20.0),
            args: vec!["440".to_owned()],
        };

        let messages = command.script_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], vec![json!("new"), json!("osc_1"), json!("cycle~"), json!("440")]);
        assert_eq!(
            messages[1],
            vec![
                json!("sendbox"),
                json!("osc_1"),
                json!("patching_rect"),
                json!(10.0),
                json!(20.0),
                json!(90.0),
                json!(42.0),
            ]
        );
    }

    #[test]
    fn content_box_types_also_get_their_args_set() {
        let command = HostCommand::NewObject {
            varname: varname("msg_1"),
            maxclass: "message".to_owned(),
            rect: Rect::at(0.0, 0.0),
            args: vec!["hello".to_owned()],
        };

        let messages = command.script_messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2], vec![json!("send"), json!("msg_1"), json!("set"), json!("hello")]);
    }

    #[test]
    fn connect_tokens_carry_both_ports() {
        let command = HostCommand::Connect {
            source: varname("a"),
            outlet: 2,
            destination: varname("b"),
            inlet: 1,
        };
        assert_eq!(
            command.script_messages(),
            vec![vec![json!("connect"), json!("a"), json!(2), json!("b"), json!(1)]]
        );
    }

    #[test]
    fn bang_is_a_plain_send() {
        let command = HostCommand::SendBang { varname: varname("button_1") };
        assert_eq!(
            command.script_messages(),
            vec![vec![json!("send"), json!("button_1"), json!("bang")]]
        );
    }
}
