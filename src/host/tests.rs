// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Patchbay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Patchbay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::{json, Value};

use crate::model::{Rect, VarName};
use crate::protocol::HostCommand;

use super::{
    apply_command, dispatch_query, object_attributes, objects_in_patch, patch_bounds,
    MirrorDocument, PatchDocument,
};

fn varname(name: &str) -> VarName {
    VarName::new(name).expect("varname")
}

fn document_with_two_boxes() -> MirrorDocument {
    let mut doc = MirrorDocument::new();
    doc.create_box_at(varname("osc_1"), "cycle~", Rect::at(50.0, 100.0), &[]);
    doc.create_box_at(varname("out_1"), "dac~", Rect::at(200.0, 300.0), &[]);
    doc
}

#[test]
fn walker_enumerates_every_box() {
    let doc = document_with_two_boxes();
    let snapshot = objects_in_patch(&doc, false);

    assert_eq!(snapshot.boxes.len(), 2);
    assert!(snapshot.lines.is_empty());
    let varnames = snapshot
        .boxes
        .iter()
        .map(|record| record.attributes.varname.as_str())
        .collect::<Vec<_>>();
    assert_eq!(varnames, vec!["osc_1", "out_1"]);
}

#[test]
fn walker_selection_filter_yields_the_subset() {
    let mut doc = document_with_two_boxes();
    doc.select(varname("out_1"));

    let snapshot = objects_in_patch(&doc, true);
    assert_eq!(snapshot.boxes.len(), 1);
    assert_eq!(snapshot.boxes[0].attributes.varname, "out_1");
}

#[test]
fn attributes_of_missing_box_are_absent() {
    let doc = document_with_two_boxes();
    assert!(object_attributes(&doc, "ghost").is_none());

    let attributes = object_attributes(&doc, "osc_1").expect("attributes");
    assert_eq!(attributes.maxclass, "cycle~");
    assert_eq!(attributes.patching_rect, [50.0, 100.0, 130.0, 122.0]);
}

#[test]
fn bounds_fold_and_empty_sentinel() {
    let empty = MirrorDocument::new();
    assert_eq!(patch_bounds(&empty), [0.0, 0.0, 0.0, 0.0]);

    let doc = document_with_two_boxes();
    assert_eq!(patch_bounds(&doc), [50.0, 100.0, 280.0, 322.0]);
}

#[test]
fn dispatch_tags_the_reply_with_the_request_id() {
    let doc = document_with_two_boxes();
    let reply = dispatch_query(&doc, "req-7", "get_avoid_rect_position", &[])
        .expect("reply");

    assert_eq!(reply.request_id, "req-7");
    assert_eq!(reply.results, json!([50.0, 100.0, 280.0, 322.0]));
}

#[test]
fn dispatch_attribute_lookup_takes_the_varname_argument() {
    let doc = document_with_two_boxes();

    let reply = dispatch_query(&doc, "req-1", "get_object_attributes", &[json!("out_1")])
        .expect("reply");
    assert_eq!(reply.results["maxclass"], json!("dac~"));

    // A missing or unknown varname resolves to null, not an error.
    let reply = dispatch_query(&doc, "req-2", "get_object_attributes", &[]).expect("reply");
    assert_eq!(reply.results, Value::Null);
}

#[test]
fn dispatch_unknown_action_produces_no_reply() {
    let doc = MirrorDocument::new();
    assert!(dispatch_query(&doc, "req-1", "get_everything_at_once", &[]).is_none());
}

#[test]
fn relay_create_connect_disconnect_delete_round_trip() {
    let mut doc = MirrorDocument::new();

    apply_command(
        &mut doc,
        &HostCommand::NewObject {
            varname: varname("a"),
            maxclass: "cycle~".to_owned(),
            rect: Rect::at(0.0, 0.0),
            args: vec![],
        },
    );
    apply_command(
        &mut doc,
        &HostCommand::NewObject {
            varname: varname("b"),
            maxclass: "dac~".to_owned(),
            rect: Rect::at(0.0, 50.0),
            args: vec![],
        },
    );
    apply_command(
        &mut doc,
        &HostCommand::Connect {
            source: varname("a"),
            outlet: 0,
            destination: varname("b"),
            inlet: 0,
        },
    );
    assert_eq!(doc.patch().lines().len(), 1);

    apply_command(
        &mut doc,
        &HostCommand::Disconnect {
            source: varname("a"),
            outlet: 0,
            destination: varname("b"),
            inlet: 0,
        },
    );
    assert!(doc.patch().lines().is_empty());

    apply_command(&mut doc, &HostCommand::Delete { varname: varname("a") });
    assert!(doc.patch().get("a").is_none());
    assert!(doc.patch().get("b").is_some());
}

#[test]
fn relay_event_commands_leave_structure_untouched() {
    let mut doc = document_with_two_boxes();
    let before = doc.patch().clone();

    apply_command(
        &mut doc,
        &HostCommand::SetAttribute {
            varname: varname("osc_1"),
            name: "bgcolor".to_owned(),
            value: json!([0.2, 0.2, 0.2, 1.0]),
        },
    );
    apply_command(
        &mut doc,
        &HostCommand::SetText { varname: varname("osc_1"), text: "cycle~ 880".to_owned() },
    );
    apply_command(
        &mut doc,
        &HostCommand::SendMessage { varname: varname("osc_1"), message: "start".to_owned() },
    );
    apply_command(&mut doc, &HostCommand::SendBang { varname: varname("osc_1") });
    apply_command(
        &mut doc,
        &HostCommand::SetNumber { varname: varname("osc_1"), value: 0.5 },
    );

    assert_eq!(doc.patch(), &before);
}
