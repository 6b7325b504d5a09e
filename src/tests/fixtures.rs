use crate::prelude::*;
use std::cell::Cell;
use std::rc::Rc;

pub trait Moving {
	fn speed(&self) -> f32;
}

pub trait Named {
	fn name(&self) -> &str;
}

#[derive(Default, Component)]
pub struct Position {
	#[holder]
	pub holder: HolderSlot<Holder>,
	pub x: Cell<f32>,
	pub y: Cell<f32>,
}

#[derive(Default, Component)]
#[capability(dyn Moving)]
pub struct Velocity {
	#[holder]
	pub holder: HolderSlot<Holder>,
	pub speed: f32,
}

impl Moving for Velocity {
	fn speed(&self) -> f32 {
		self.speed
	}
}

#[derive(Component)]
#[capability(dyn Moving, dyn Named)]
pub struct Rocket(pub &'static str);

impl Moving for Rocket {
	fn speed(&self) -> f32 {
		100.0
	}
}

impl Named for Rocket {
	fn name(&self) -> &str {
		self.0
	}
}

#[derive(Default, Component)]
pub struct Tag;

pub struct Scene {
	pub name: &'static str,
	pub components: Holder,
}

impl Scene {
	pub fn shared(name: &'static str) -> Rc<Self> {
		Rc::new(Self {
			name,
			components: Holder::new(),
		})
	}
}

impl ComponentHolder for Scene {
	type Capability = dyn Component;

	fn holder(&self) -> &Holder {
		&self.components
	}
}

#[derive(Default, Component)]
pub struct Camera {
	#[holder]
	pub scene: HolderSlot<Scene>,
}

pub trait Widget: Component {
	fn width(&self) -> u32;
}

#[derive(Default, Component)]
#[capability(dyn Widget)]
pub struct Button {
	#[holder]
	pub panel: HolderSlot<Holder<dyn Widget>>,
	pub width: u32,
}

impl Widget for Button {
	fn width(&self) -> u32 {
		self.width
	}
}

/// Identity comparison between two differently typed handles.
pub fn same<A: ?Sized, B: ?Sized>(a: &Rc<A>, b: &Rc<B>) -> bool {
	crate::data_structures::same_element(a, b)
}
