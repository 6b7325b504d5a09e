use crate::tests::fixtures::{Camera, Position, Scene};
use crate::prelude::*;
use std::rc::Rc;

#[test]
pub fn bind_succeeds_exactly_once() {
	let first = Holder::shared();
	let second = Holder::shared();
	let position = Rc::new(Position::default());

	assert!(!position.is_bound(), "A new component must start unbound");
	assert!(position.holder().is_none());

	position.bind(first.clone()).expect("First bind should succeed");
	assert!(position.is_bound());

	for holder in [first.clone(), second.clone(), first.clone()] {
		let result = position.bind(holder);
		assert!(
			matches!(result, Err(BindError::AlreadyBound { .. })),
			"Every bind after the first must fail, got {result:?}"
		);
		assert!(Rc::ptr_eq(&position.holder().unwrap(), &first), "The holder changed after a failed bind");
	}
}

#[test]
pub fn type_mismatch_leaves_component_unbound() {
	let camera = Rc::new(Camera::default());
	let result = camera.bind(Holder::shared());

	assert_eq!(
		result,
		Err(BindError::TypeMismatch {
			expected: std::any::type_name::<Scene>(),
			found: std::any::type_name::<Holder>(),
		})
	);
	assert!(!camera.is_bound(), "A rejected bind must leave the component unbound");

	let scene = Scene::shared("main");
	camera.bind(scene.clone()).expect("Binding to the expected holder type should succeed");
	assert!(Rc::ptr_eq(&camera.holder().unwrap(), &scene));
}

#[test]
pub fn type_is_checked_before_binding_state() {
	let camera = Rc::new(Camera::default());
	camera.bind(Scene::shared("main")).unwrap();

	let result = camera.bind(Holder::shared());
	assert!(matches!(result, Err(BindError::TypeMismatch { .. })), "Got {result:?}");
}

#[test]
pub fn erased_bindable_component() {
	let scene = Scene::shared("main");
	let camera = scene.add_component(Camera::default).unwrap();

	let bindable = scene
		.get_component::<dyn BindableComponent>()
		.expect("Camera should be found as a bindable component");
	assert!(bindable.is_bound());

	let holder = bindable.bound_holder().expect("Scene is still alive");
	assert_eq!(holder.holder_name(), std::any::type_name::<Scene>());

	let holder = holder.downcast_rc::<Scene>().ok().expect("Bound holder should be the scene");
	assert!(Rc::ptr_eq(&holder, &scene));
	assert!(Rc::ptr_eq(&camera.holder().unwrap(), &holder));
}

#[test]
pub fn holder_slot_on_its_own() {
	let slot = HolderSlot::<Holder>::new();
	let holder = Holder::shared();
	assert!(!slot.is_bound());
	assert!(slot.get().is_none());

	slot.bind(holder.clone()).unwrap();
	assert!(Rc::ptr_eq(&slot.get().unwrap(), &holder));
	assert!(format!("{slot:?}").contains("bound: true"));
}

#[test]
pub fn error_messages() {
	let mismatch = BindError::TypeMismatch {
		expected: "Scene",
		found: "Holder",
	};
	assert_eq!(mismatch.to_string(), "holder must be a `Scene`, found a `Holder`");

	let bound = BindError::AlreadyBound { holder: "Scene" };
	assert_eq!(
		bound.to_string(),
		"component is already bound to a `Scene`; a component can only have one holder"
	);

	let error = Error::from(bound.clone());
	assert_eq!(error.to_string(), "failed to bind component to its holder");
	assert_eq!(
		std::error::Error::source(&error).map(|source| source.to_string()),
		Some(bound.to_string())
	);
}
