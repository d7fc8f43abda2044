//! Test utilities & fixtures.
//! Builds a one-village world on the in-memory host with the yard installed.

use training_ground::config::SceneConfig;
use training_ground::training::{
    Character, ChallengePolicy, ConnectionGroup, MemoryHost, Roster, SceneGraph, SceneId,
    SceneScaffold, TrainingEvent, TrainingModule, YardAction, YardView,
};

pub struct World {
    pub module: TrainingModule,
    pub host: MemoryHost,
    pub village: SceneId,
    pub yard: SceneId,
}

pub fn village_scaffold(scene: &SceneConfig) -> SceneScaffold {
    SceneScaffold {
        template: scene.village_template.clone(),
        title: "Village".to_string(),
        description: "The village square bustles with activity.".to_string(),
        groups: vec![ConnectionGroup::new(&scene.village_group, "Outside")],
    }
}

/// One village, bundled roster, default policy, yard installed.
pub fn setup_world() -> World {
    let scene = SceneConfig::default();
    let module = TrainingModule::new(Roster::bundled().unwrap(), ChallengePolicy::default());
    let mut host = MemoryHost::new();
    let village = host.create_scene(village_scaffold(&scene));
    let record = module.install(&mut host, &scene).unwrap();
    let yard = record.yards[0];
    World {
        module,
        host,
        village,
        yard,
    }
}

pub fn enter_yard(world: &mut World, character: &mut Character) -> YardView {
    let event = TrainingEvent::NavigateToYard {
        scene: world.yard,
        action: None,
    };
    world
        .module
        .handle_event(&mut world.host, character, event)
        .unwrap()
        .expect("entering the yard renders a view")
}

#[allow(dead_code)] // Not every test file takes yard actions.
pub fn take_action(world: &mut World, character: &mut Character, action: YardAction) -> YardView {
    let event = TrainingEvent::NavigateToYard {
        scene: world.yard,
        action: Some(action),
    };
    world
        .module
        .handle_event(&mut world.host, character, event)
        .unwrap()
        .expect("yard actions render a view")
}
