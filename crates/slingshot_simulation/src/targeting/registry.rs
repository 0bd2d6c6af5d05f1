//! Process-wide реестр живых целей

use std::collections::BTreeSet;

use bevy::prelude::*;

use super::components::Target;

/// Реестр всех живых целей (non-owning)
///
/// Хранит только Entity id: владение lifetime у World, удаление из реестра =
/// просто removal. Despawned entity может задержаться до следующего sync;
/// читатели обязаны пропускать entities без Target (Query::get → Err).
///
/// BTreeSet: порядок вставки не важен, но итерация детерминирована.
#[derive(Resource, Debug, Default)]
pub struct TargetRegistry {
    targets: BTreeSet<Entity>,
}

impl TargetRegistry {
    /// Повторная регистрация: no-op (false)
    pub fn register(&mut self, target: Entity) -> bool {
        self.targets.insert(target)
    }

    /// Удаление отсутствующей цели: no-op (false)
    pub fn unregister(&mut self, target: Entity) -> bool {
        self.targets.remove(&target)
    }

    pub fn contains(&self, target: Entity) -> bool {
        self.targets.contains(&target)
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.targets.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Система: Added<Target> / RemovedComponents<Target> → TargetRegistry
///
/// Единственный writer реестра. Работает в том же тике перед acquisition,
/// поэтому scan никогда не видит реестр в процессе мутации.
pub fn sync_target_registry(
    mut registry: ResMut<TargetRegistry>,
    added: Query<Entity, Added<Target>>,
    mut removed: RemovedComponents<Target>,
) {
    for entity in added.iter() {
        if registry.register(entity) {
            crate::log(&format!("Targets: registered {:?} ({} live)", entity, registry.len()));
        }
    }

    for entity in removed.read() {
        if registry.unregister(entity) {
            crate::log(&format!("Targets: unregistered {:?} ({} live)", entity, registry.len()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_register_is_noop() {
        let mut registry = TargetRegistry::default();
        let target = Entity::from_raw(7);

        assert!(registry.register(target));
        assert!(!registry.register(target));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister_absent_is_noop() {
        let mut registry = TargetRegistry::default();
        assert!(!registry.unregister(Entity::from_raw(3)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_unregister_roundtrip() {
        let mut registry = TargetRegistry::default();
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);

        registry.register(a);
        registry.register(b);
        registry.unregister(a);

        assert!(!registry.contains(a));
        assert!(registry.contains(b));
        assert_eq!(registry.iter().collect::<Vec<_>>(), vec![b]);
    }
}
