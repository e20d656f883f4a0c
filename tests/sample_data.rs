//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use lazyseq::engine_core::types::Downcast;
use lazyseq::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub name: &'static str,
}

#[derive(Debug, Clone)]
pub struct Department {
    pub employees: Vec<Employee>,
}

pub fn departments() -> Vec<Department> {
    let staff = |names: &[&'static str]| Department {
        employees: names.iter().map(|&name| Employee { name }).collect(),
    };
    vec![staff(&["Bob", "Jack"]), staff(&["Jim", "John"])]
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub user_id: u32,
    pub email: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: u32,
    pub title: &'static str,
    pub user_id: u32,
}

pub fn users() -> Vec<User> {
    vec![
        User {
            user_id: 1,
            email: "333@qq.com",
        },
        User {
            user_id: 2,
            email: "444@qq.com",
        },
    ]
}

pub fn orders() -> Vec<Order> {
    vec![
        Order {
            order_id: 1,
            title: "order-1",
            user_id: 1,
        },
        Order {
            order_id: 2,
            title: "order-2",
            user_id: 1,
        },
    ]
}

/// Caller-side shape family used to exercise `of_type` / `cast`.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Foo(u8),
    Bar(u8),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Foo(pub u8);

#[derive(Debug, Clone, PartialEq)]
pub struct Bar(pub u8);

impl Downcast<Foo> for Shape {
    fn target() -> &'static str {
        "Foo"
    }

    fn shape(&self) -> &'static str {
        match self {
            Shape::Foo(_) => "Foo",
            Shape::Bar(_) => "Bar",
        }
    }

    fn downcast(self) -> std::result::Result<Foo, Self> {
        match self {
            Shape::Foo(id) => Ok(Foo(id)),
            other => Err(other),
        }
    }
}

impl Downcast<Bar> for Shape {
    fn target() -> &'static str {
        "Bar"
    }

    fn shape(&self) -> &'static str {
        Downcast::<Foo>::shape(self)
    }

    fn downcast(self) -> std::result::Result<Bar, Self> {
        match self {
            Shape::Bar(id) => Ok(Bar(id)),
            other => Err(other),
        }
    }
}

pub fn shapes() -> Vec<Shape> {
    vec![Shape::Foo(0), Shape::Foo(1), Shape::Bar(2), Shape::Bar(3)]
}

/// A restartable source that counts how many elements have been pulled.
pub fn counted(items: Vec<i32>) -> (impl Sequence<Item = i32>, Rc<Cell<usize>>) {
    let pulls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&pulls);
    let seq = from_vec(items).map(move |x| {
        counter.set(counter.get() + 1);
        x
    });
    (seq, pulls)
}
