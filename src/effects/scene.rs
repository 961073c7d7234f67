//! Scene-based state machine.
//!
//! Each state carries an optional scene and an optional transition. Entering
//! the state either enters the scene directly or animates into it.

use super::machine::StateMachine;
use crate::core::{State, StateExecutor};
use std::fmt;
use std::sync::Arc;

/// Identifier of a layout a scene can be built from.
pub type LayoutId = u32;

/// A scene of the host UI toolkit: a layout bound to a container.
pub trait Scene: Send + Sync {
    /// Replace the container's content with this scene, without animation.
    fn enter(&self);

    /// Whether the scene's root container is attached to a window.
    fn is_root_attached(&self) -> bool;
}

/// An animation used to move between scenes.
pub trait SceneTransition: Send + Sync {
    /// A fresh copy of this transition.
    ///
    /// Transitions hold per-run state, so each state change animates with its
    /// own copy.
    fn clone_transition(&self) -> Box<dyn SceneTransition>;
}

/// Runs animated scene changes.
pub trait TransitionManager: Send + Sync {
    fn go(&self, scene: &dyn Scene, transition: Box<dyn SceneTransition>);
}

/// Container able to build scenes from layouts.
pub trait SceneContainer: Send + Sync {
    fn scene_for_layout(&self, layout: LayoutId) -> Arc<dyn Scene>;
}

/// Scene and transition of one state.
#[derive(Clone, Default)]
pub struct SceneEffects {
    scene: Option<Arc<dyn Scene>>,
    transition: Option<Arc<dyn SceneTransition>>,
}

impl SceneEffects {
    pub fn scene(mut self, scene: Arc<dyn Scene>) -> Self {
        self.scene = Some(scene);
        self
    }

    /// Use the scene `container` builds for `layout`.
    pub fn scene_for_layout(self, layout: LayoutId, container: &dyn SceneContainer) -> Self {
        self.scene(container.scene_for_layout(layout))
    }

    pub fn transition(mut self, transition: Arc<dyn SceneTransition>) -> Self {
        self.transition = Some(transition);
        self
    }

    pub fn has_scene(&self) -> bool {
        self.scene.is_some()
    }

    pub fn has_transition(&self) -> bool {
        self.transition.is_some()
    }
}

impl fmt::Debug for SceneEffects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneEffects")
            .field("has_scene", &self.has_scene())
            .field("has_transition", &self.has_transition())
            .finish()
    }
}

impl State<SceneEffects> {
    pub fn scene(self, scene: Arc<dyn Scene>) -> Self {
        self.with_effects(|e| e.scene(scene))
    }

    pub fn scene_for_layout(self, layout: LayoutId, container: &dyn SceneContainer) -> Self {
        self.with_effects(|e| e.scene_for_layout(layout, container))
    }

    pub fn transition(self, transition: Arc<dyn SceneTransition>) -> Self {
        self.with_effects(|e| e.transition(transition))
    }
}

/// Executor entering scenes, animated through a [`TransitionManager`].
pub struct SceneExecutor {
    manager: Arc<dyn TransitionManager>,
}

impl SceneExecutor {
    pub fn new(manager: Arc<dyn TransitionManager>) -> Self {
        Self { manager }
    }
}

impl StateExecutor for SceneExecutor {
    type Effects = SceneEffects;

    fn perform_change_state(&mut self, state: &State<SceneEffects>) {
        let effects = state.effects();
        let Some(scene) = effects.scene.as_deref() else {
            return;
        };

        match effects.transition.as_deref() {
            Some(transition) if scene.is_root_attached() => {
                self.manager.go(scene, transition.clone_transition());
            }
            _ => scene.enter(),
        }
    }
}

/// State machine moving between scenes.
pub type SceneStateMachine = StateMachine<SceneExecutor>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeScene {
        attached: AtomicBool,
        entered: AtomicUsize,
    }

    impl Scene for FakeScene {
        fn enter(&self) {
            self.entered.fetch_add(1, Ordering::SeqCst);
        }

        fn is_root_attached(&self) -> bool {
            self.attached.load(Ordering::SeqCst)
        }
    }

    #[derive(Default)]
    struct FakeTransition {
        clones: Arc<AtomicUsize>,
    }

    impl SceneTransition for FakeTransition {
        fn clone_transition(&self) -> Box<dyn SceneTransition> {
            self.clones.fetch_add(1, Ordering::SeqCst);
            Box::new(FakeTransition {
                clones: Arc::clone(&self.clones),
            })
        }
    }

    #[derive(Default)]
    struct FakeManager {
        animations: AtomicUsize,
    }

    impl TransitionManager for FakeManager {
        fn go(&self, _scene: &dyn Scene, _transition: Box<dyn SceneTransition>) {
            self.animations.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct FakeContainer {
        scene: Arc<FakeScene>,
    }

    impl SceneContainer for FakeContainer {
        fn scene_for_layout(&self, _layout: LayoutId) -> Arc<dyn Scene> {
            Arc::clone(&self.scene) as Arc<dyn Scene>
        }
    }

    fn attached_scene(attached: bool) -> Arc<FakeScene> {
        let scene = Arc::new(FakeScene::default());
        scene.attached.store(attached, Ordering::SeqCst);
        scene
    }

    #[test]
    fn state_without_scene_does_nothing() {
        let manager = Arc::new(FakeManager::default());
        let mut executor = SceneExecutor::new(manager.clone());

        executor.perform_change_state(&State::default());

        assert_eq!(manager.animations.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn scene_without_transition_is_entered() {
        let manager = Arc::new(FakeManager::default());
        let scene = attached_scene(true);
        let state = State::<SceneEffects>::default().scene(scene.clone());

        SceneExecutor::new(manager.clone()).perform_change_state(&state);

        assert_eq!(scene.entered.load(Ordering::SeqCst), 1);
        assert_eq!(manager.animations.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn detached_scene_is_entered_even_with_transition() {
        let manager = Arc::new(FakeManager::default());
        let scene = attached_scene(false);
        let state = State::<SceneEffects>::default()
            .scene(scene.clone())
            .transition(Arc::new(FakeTransition::default()));

        SceneExecutor::new(manager.clone()).perform_change_state(&state);

        assert_eq!(scene.entered.load(Ordering::SeqCst), 1);
        assert_eq!(manager.animations.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn attached_scene_animates_with_cloned_transition() {
        let manager = Arc::new(FakeManager::default());
        let scene = attached_scene(true);
        let transition = Arc::new(FakeTransition::default());
        let clones = Arc::clone(&transition.clones);
        let state = State::<SceneEffects>::default()
            .scene(scene.clone())
            .transition(transition);

        let mut executor = SceneExecutor::new(manager.clone());
        executor.perform_change_state(&state);
        executor.perform_change_state(&state);

        assert_eq!(scene.entered.load(Ordering::SeqCst), 0);
        assert_eq!(manager.animations.load(Ordering::SeqCst), 2);
        assert_eq!(clones.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn scene_machine_enters_layout_scene() {
        let manager = Arc::new(FakeManager::default());
        let container = FakeContainer {
            scene: attached_scene(false),
        };
        let mut machine = SceneStateMachine::new(SceneExecutor::new(manager));
        machine
            .state(0, |s| s.scene_for_layout(10, &container))
            .unwrap()
            .state(1, |s| s)
            .unwrap();
        machine.config_mut().set_initial_state(0).unwrap();

        machine.start().unwrap();
        machine.change_state(1).unwrap();

        assert_eq!(container.scene.entered.load(Ordering::SeqCst), 1);
        assert_eq!(machine.current_state_key(), Some(1));
    }
}
