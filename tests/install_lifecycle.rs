/// Integration tests for installing and uninstalling the yards and for
/// routing raw engine hooks into the module.
mod common;

use common::{enter_yard, village_scaffold};
use serde_json::json;
use training_ground::config::SceneConfig;
use training_ground::training::{
    Character, ChallengePolicy, InstallRecord, MemoryHost, Roster, SceneGraph, SceneScaffold,
    TrainingEvent, TrainingModule, YardAction,
};

fn module() -> TrainingModule {
    TrainingModule::new(Roster::bundled().unwrap(), ChallengePolicy::default())
}

#[test]
fn every_village_gets_its_own_yard() {
    let scene = SceneConfig::default();
    let module = module();
    let mut host = MemoryHost::new();
    let first = host.create_scene(village_scaffold(&scene));
    let second = host.create_scene(village_scaffold(&scene));

    let record = module.install(&mut host, &scene).unwrap();
    assert_eq!(record.yards.len(), 2);
    assert_eq!(host.scenes_with_template("training-ground/yard"), record.yards);

    let from_first = host.exits(first).unwrap();
    assert_eq!(from_first.len(), 1);
    assert_eq!(from_first[0].destination, record.yards[0]);
    assert_eq!(from_first[0].group.as_ref().unwrap().title, "Outside");
    assert_eq!(host.exits(second).unwrap()[0].destination, record.yards[1]);
}

#[test]
fn village_without_outside_group_is_connected_directly() {
    let scene = SceneConfig::default();
    let module = module();
    let mut host = MemoryHost::new();
    let village = host.create_scene(SceneScaffold {
        template: scene.village_template.clone(),
        title: "Hamlet".to_string(),
        description: String::new(),
        groups: vec![],
    });

    module.install(&mut host, &scene).unwrap();
    let exits = host.exits(village).unwrap();
    assert_eq!(exits.len(), 1);
    assert!(exits[0].group.is_none());
    assert_eq!(exits[0].destination_title, "Bluspring's Warrior Training");
}

#[test]
fn uninstall_removes_generated_yards_and_detaches_foreign_ones() {
    let scene = SceneConfig::default();
    let module = module();
    let mut host = MemoryHost::new();
    let village = host.create_scene(village_scaffold(&scene));
    let record = module.install(&mut host, &scene).unwrap();

    // A yard placed by hand, not by install.
    let handmade = host.create_scene(training_ground::training::narrative::yard_scaffold());

    let persisted = serde_json::to_string(&record).unwrap();
    let restored: InstallRecord = serde_json::from_str(&persisted).unwrap();
    module.uninstall(&mut host, &restored).unwrap();

    assert!(host.scene(record.yards[0]).is_none());
    assert!(host.exits(village).unwrap().is_empty());
    let kept = host.scene(handmade).expect("handmade yard survives");
    assert!(kept.template.is_none());
    assert!(host.scenes_with_template("training-ground/yard").is_empty());
    assert!(host.scene(village).is_some());
}

#[test]
fn hooks_drive_the_module_end_to_end() {
    let mut world = common::setup_world();
    let mut hero = Character::new("Violet");
    world.host.set_experience(&hero, 100_000);

    let hook = format!("h/lotgd/core/navigate-to/{}", "training-ground/yard");
    let payload = json!({ "scene": world.yard, "parameters": { "action": YardAction::Challenge.param() } });
    let event = TrainingEvent::from_hook(&hook, &payload).unwrap().unwrap();
    world.module.handle_event(&mut world.host, &mut hero, event).unwrap();
    assert!(hero.challenge.seen_master_today);

    let master = world.host.last_battle().unwrap().opponent.clone();
    let payload = json!({
        "battleIdentifier": "training-ground/battle",
        "referrerSceneId": world.yard,
        "winner": { "kind": "character", "id": hero.id, "name": hero.name },
        "loser": serde_json::to_value(training_ground::training::Combatant::Master(master)).unwrap(),
    });
    let event = TrainingEvent::from_hook("h/lotgd/module-fight/battle-over", &payload)
        .unwrap()
        .unwrap();
    let view = world
        .module
        .handle_event(&mut world.host, &mut hero, event)
        .unwrap()
        .unwrap();
    assert_eq!(view.title, "You won!");
    assert_eq!(hero.level, 2);

    let event = TrainingEvent::from_hook("h/lotgd/module-new-day/after", &json!({})).unwrap().unwrap();
    world.module.handle_event(&mut world.host, &mut hero, event).unwrap();
    assert!(enter_yard(&mut world, &mut hero).has_action("Challenge Master", Some("The Yard")));
}
