// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Tests for Objective-J code generation.

use super::*;
use crate::semantic_analysis::{
    AccessorSpec, ClassModel, InstanceVariable, MethodContainer, MethodRecord, ProtocolModel,
};
use crate::source_analysis::Span;

fn method(selector: &str, types: &[&str]) -> MethodRecord {
    MethodRecord::new(selector, types.iter().copied(), Span::default())
}

fn protocol_registry() -> ModelRegistry {
    let mut person = ProtocolModel::new("Person", Span::default());
    person.add_instance_method(method("eat", &["void"]));

    let mut parent = ProtocolModel::new("Parent", Span::default());
    parent.add_instance_method(method("one", &["void"]));
    parent.add_instance_method(method("two", &["int"]));
    parent.add_class_method(method("classMethod", &["void"]));

    let mut child = ProtocolModel::new("Child", Span::default())
        .with_parent("Parent")
        .with_parent("Person");
    child.add_instance_method(method("three", &["float"]));
    child.add_instance_method(method("required", &["id"]));

    let mut registry = ModelRegistry::new();
    registry.add_protocol(person);
    registry.add_protocol(parent);
    registry.add_protocol(child);
    registry
}

fn person_registry() -> ModelRegistry {
    let mut greeter = ProtocolModel::new("Greeter", Span::default());
    greeter.add_instance_method(method("greet", &["CPString"]));

    let mut person = ClassModel::new("Person", Span::default()).with_superclass("CPObject");
    person.add_protocol("Greeter");
    person.add_instance_variable(
        InstanceVariable::new("name", "CPString", Span::default())
            .with_accessors(AccessorSpec::new().copy()),
    );
    person.add_instance_variable(
        InstanceVariable::new("age", "int", Span::default())
            .with_accessors(AccessorSpec::new().readonly()),
    );
    person.add_instance_method(method("greet", &["CPString"]));
    person.add_class_method(method("personWithName:", &["id", "CPString"]));

    let mut registry = ModelRegistry::new();
    registry.add_protocol(greeter);
    registry.add_class(ClassModel::new("CPObject", Span::default()));
    registry.add_class(person);
    registry
}

fn person_bodies() -> MethodBodies {
    let mut bodies = MethodBodies::new();
    bodies.insert(
        "Person",
        MethodKind::Instance,
        "greet",
        "function $Person__greet(self, _cmd)\n{\n    return \"Hello, \" + self.name;\n}",
    );
    bodies
}

#[test]
fn test_generate_protocol_without_parents() {
    let registry = protocol_registry();
    let code = generate_protocol(&registry, "Person", &CodegenOptions::new()).unwrap();
    let expected = r#"// @protocol Person
var $the_protocol = objj_allocateProtocol("Person");

objj_registerProtocol($the_protocol);

protocol_addMethodDescriptions($the_protocol,
[
    // - (void)eat
    new objj_method(sel_getUid("eat"), null,
    // argument types
    ["void"])
],
true, true);
// @end: @protocol Person
"#;
    assert_eq!(code, expected);
}

#[test]
fn test_generate_protocol_with_class_methods() {
    let registry = protocol_registry();
    let code = generate_protocol(&registry, "Parent", &CodegenOptions::new()).unwrap();
    let expected = r#"// @protocol Parent
var $the_protocol = objj_allocateProtocol("Parent");

objj_registerProtocol($the_protocol);

protocol_addMethodDescriptions($the_protocol,
[
    // - (void)one
    new objj_method(sel_getUid("one"), null,
    // argument types
    ["void"]),

    // - (int)two
    new objj_method(sel_getUid("two"), null,
    // argument types
    ["int"])
],
true, true);

protocol_addMethodDescriptions($the_protocol,
[
    // + (void)classMethod
    new objj_method(sel_getUid("classMethod"), null,
    // argument types
    ["void"])
],
true, false);
// @end: @protocol Parent
"#;
    assert_eq!(code, expected);
}

#[test]
fn test_generate_protocol_with_parents() {
    let registry = protocol_registry();
    let code = generate_protocol(&registry, "Child", &CodegenOptions::new()).unwrap();
    let expected = r#"// @protocol Child <Parent, Person>
var $the_protocol = objj_allocateProtocol("Child");

var $the_inherited_protocol = objj_getProtocol("Parent");

if (!$the_inherited_protocol)
    throw new SyntaxError("Undefined protocol: Parent");

protocol_addProtocol($the_protocol, $the_inherited_protocol);

$the_inherited_protocol = objj_getProtocol("Person");

if (!$the_inherited_protocol)
    throw new SyntaxError("Undefined protocol: Person");

protocol_addProtocol($the_protocol, $the_inherited_protocol);

objj_registerProtocol($the_protocol);

protocol_addMethodDescriptions($the_protocol,
[
    // - (float)three
    new objj_method(sel_getUid("three"), null,
    // argument types
    ["float"]),

    // - (id)required
    new objj_method(sel_getUid("required"), null,
    // argument types
    ["id"])
],
true, true);
// @end: @protocol Child <Parent, Person>
"#;
    assert_eq!(code, expected);
}

#[test]
fn test_generate_protocol_unknown() {
    let registry = protocol_registry();
    assert_eq!(
        generate_protocol(&registry, "Missing", &CodegenOptions::new()),
        Err(CodeGenError::UnknownProtocol {
            name: "Missing".into()
        })
    );
}

#[test]
fn test_generate_class_with_accessors_and_protocols() {
    let registry = person_registry();
    let code =
        generate_class(&registry, "Person", &person_bodies(), &CodegenOptions::new()).unwrap();
    let expected = r#"// @implementation Person : CPObject
var $the_class = objj_allocateClassPair(CPObject, "Person");

var $the_protocol = objj_getProtocol("Greeter");

if (!$the_protocol)
    throw new SyntaxError("Undefined protocol: Greeter");

class_addProtocol($the_class, $the_protocol);

class_addIvars($the_class,
[
    new objj_ivar("name", "CPString"),
    new objj_ivar("age", "int")
]);

objj_registerClassPair($the_class);

class_addMethods($the_class,
[
    // @accessors(getter=name)
    new objj_method(sel_getUid("name"),
    function $Person__name(self, _cmd)
    {
        return self.name;
    },
    // argument types
    ["CPString"]),

    // @accessors(copy, setter=setName:)
    new objj_method(sel_getUid("setName:"),
    function $Person__setName_(self, _cmd, newValue)
    {
        if (self.name !== newValue)
            self.name = newValue == null ? null : newValue.isa.objj_msgSend0(newValue, "copy");
    },
    // argument types
    ["void", "CPString"]),

    // @accessors(readonly, getter=age)
    new objj_method(sel_getUid("age"),
    function $Person__age(self, _cmd)
    {
        return self.age;
    },
    // argument types
    ["int"]),

    // - (CPString)greet
    new objj_method(sel_getUid("greet"),
    function $Person__greet(self, _cmd)
    {
        return "Hello, " + self.name;
    },
    // argument types
    ["CPString"])
]);

class_addMethods($the_class.isa,
[
    // + (id)personWithName:
    new objj_method(sel_getUid("personWithName:"),
    $Person__personWithName_,
    // argument types
    ["id", "CPString"])
]);
// @end: @implementation Person : CPObject
"#;
    assert_eq!(code, expected);
}

#[test]
fn test_generate_root_class_without_members() {
    let registry = person_registry();
    let code = generate_class(
        &registry,
        "CPObject",
        &MethodBodies::new(),
        &CodegenOptions::new(),
    )
    .unwrap();
    let expected = r#"// @implementation CPObject
var $the_class = objj_allocateClassPair(Nil, "CPObject");

objj_registerClassPair($the_class);
// @end: @implementation CPObject
"#;
    assert_eq!(code, expected);
}

#[test]
fn test_generate_class_without_comments() {
    let registry = person_registry();
    let options = CodegenOptions::new().with_comments(false);
    let code = generate_class(&registry, "CPObject", &MethodBodies::new(), &options).unwrap();
    assert_eq!(
        code,
        "var $the_class = objj_allocateClassPair(Nil, \"CPObject\");\n\
         \n\
         objj_registerClassPair($the_class);\n"
    );
}

#[test]
fn test_generate_class_root_superclass_option() {
    let registry = person_registry();
    let options = CodegenOptions::new().with_root_superclass("null");
    let code = generate_class(&registry, "CPObject", &MethodBodies::new(), &options).unwrap();
    assert!(code.contains("objj_allocateClassPair(null, \"CPObject\");"));
}

#[test]
fn test_generate_class_unknown() {
    let registry = person_registry();
    assert_eq!(
        generate_class(
            &registry,
            "Nobody",
            &MethodBodies::new(),
            &CodegenOptions::new()
        ),
        Err(CodeGenError::UnknownClass {
            name: "Nobody".into()
        })
    );
}

#[test]
fn test_plain_accessors_assign_directly() {
    let mut counter = ClassModel::new("Counter", Span::default());
    counter.add_instance_variable(
        InstanceVariable::new("count", "int", Span::default()).with_accessors(AccessorSpec::new()),
    );
    let mut registry = ModelRegistry::new();
    registry.add_class(counter);

    let code = generate_class(
        &registry,
        "Counter",
        &MethodBodies::new(),
        &CodegenOptions::new(),
    )
    .unwrap();
    assert!(code.contains("    function $Counter__count(self, _cmd)\n    {\n        return self.count;\n    },"));
    assert!(code.contains(
        "    function $Counter__setCount_(self, _cmd, newValue)\n    {\n        self.count = newValue;\n    },"
    ));
    assert!(!code.contains("objj_msgSend0"));
}

#[test]
fn test_explicit_method_replaces_synthesized_accessor() {
    let mut counter = ClassModel::new("Counter", Span::default());
    counter.add_instance_variable(
        InstanceVariable::new("count", "int", Span::default()).with_accessors(AccessorSpec::new()),
    );
    counter.add_instance_method(method("count", &["int"]));
    let mut registry = ModelRegistry::new();
    registry.add_class(counter);

    let code = generate_class(
        &registry,
        "Counter",
        &MethodBodies::new(),
        &CodegenOptions::new(),
    )
    .unwrap();
    assert!(code.contains("    // - (int)count\n    new objj_method(sel_getUid(\"count\"),\n    $Counter__count,"));
    assert!(!code.contains("@accessors(getter=count)"));
    assert!(code.contains("@accessors(setter=setCount:)"));
}

#[test]
fn test_accessor_with_renamed_selectors() {
    let mut view = ClassModel::new("View", Span::default());
    view.add_instance_variable(
        InstanceVariable::new("_hidden", "BOOL", Span::default()).with_accessors(
            AccessorSpec::new()
                .with_property("hidden")
                .with_getter("isHidden"),
        ),
    );
    let mut registry = ModelRegistry::new();
    registry.add_class(view);

    let code = generate_class(&registry, "View", &MethodBodies::new(), &CodegenOptions::new())
        .unwrap();
    assert!(code.contains("function $View__isHidden(self, _cmd)"));
    assert!(code.contains("return self._hidden;"));
    assert!(code.contains("function $View__setHidden_(self, _cmd, newValue)"));
    assert!(code.contains("self._hidden = newValue;"));
}

#[test]
fn test_method_entries_follow_declaration_order() {
    let selectors = ["zebra", "apple", "mango", "banana:", "cherry"];
    let mut class = ClassModel::new("Fruit", Span::default());
    for selector in selectors {
        class.add_instance_method(method(selector, &["void"]));
    }
    // Redeclaring keeps the first slot.
    class.add_instance_method(method("apple", &["id"]));
    let mut registry = ModelRegistry::new();
    registry.add_class(class);

    let code = generate_class(&registry, "Fruit", &MethodBodies::new(), &CodegenOptions::new())
        .unwrap();
    let positions: Vec<usize> = selectors
        .iter()
        .map(|selector| code.find(&format!("sel_getUid(\"{selector}\")")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(code.contains("// - (id)apple"));
    assert!(!code.contains("// - (void)apple"));
}

#[test]
fn test_generation_is_deterministic() {
    let registry = person_registry();
    let bodies = person_bodies();
    let options = CodegenOptions::new();
    let first = generate(&registry, &bodies, &options).unwrap();
    let second = generate(&registry, &bodies, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_generate_emits_protocols_before_classes() {
    let registry = person_registry();
    let code = generate(&registry, &person_bodies(), &CodegenOptions::new()).unwrap();
    let protocol = code.find("// @protocol Greeter").unwrap();
    let root = code.find("// @implementation CPObject").unwrap();
    let person = code.find("// @implementation Person : CPObject").unwrap();
    assert!(protocol < root && root < person);
    assert!(code.contains("// @end: @protocol Greeter\n\n// @implementation CPObject\n"));
    assert!(code.ends_with("// @end: @implementation Person : CPObject\n"));
}

#[test]
fn test_generate_category() {
    let mut registry = person_registry();
    let mut category = CategoryModel::new("Person", "Birthday", Span::default());
    category.add_instance_method(method("celebrate", &["void"]));
    category.add_class_method(method("oldest", &["Person"]));
    registry.apply_category(&category).unwrap();

    let code = generate_category(
        &registry,
        &category,
        &MethodBodies::new(),
        &CodegenOptions::new(),
    )
    .unwrap();
    let expected = r#"// @implementation Person (Birthday)
var $the_class = objj_getClass("Person");

if (!$the_class)
    throw new SyntaxError("Undefined class: Person");

class_addMethods($the_class,
[
    // - (void)celebrate
    new objj_method(sel_getUid("celebrate"),
    $Person__celebrate,
    // argument types
    ["void"])
]);

class_addMethods($the_class.isa,
[
    // + (Person)oldest
    new objj_method(sel_getUid("oldest"),
    $Person__oldest,
    // argument types
    ["Person"])
]);
// @end: @implementation Person (Birthday)
"#;
    assert_eq!(code, expected);
}

#[test]
fn test_category_does_not_need_registered_class() {
    let registry = ModelRegistry::new();
    let category = CategoryModel::new("CPString", "Empty", Span::default());
    let code = generate_category(
        &registry,
        &category,
        &MethodBodies::new(),
        &CodegenOptions::new().with_comments(false),
    )
    .unwrap();
    assert_eq!(
        code,
        "var $the_class = objj_getClass(\"CPString\");\n\
         \n\
         if (!$the_class)\n\
         \x20   throw new SyntaxError(\"Undefined class: CPString\");\n"
    );
}

#[test]
fn test_synthesized_accessor_in_category_without_class_fails() {
    let registry = ModelRegistry::new();
    let mut category = CategoryModel::new("Ghost", "Accessors", Span::default());
    category.add_instance_method(MethodRecord::with_origin(
        "spooky",
        ["id"],
        Span::default(),
        crate::semantic_analysis::MethodOrigin::Getter {
            ivar: "spooky".into(),
        },
    ));
    assert_eq!(
        generate_category(
            &registry,
            &category,
            &MethodBodies::new(),
            &CodegenOptions::new()
        ),
        Err(CodeGenError::UnknownInstanceVariable {
            class: "Ghost".into(),
            selector: "spooky".into(),
            ivar: "spooky".into(),
        })
    );
}

#[test]
fn test_method_bodies_are_keyed_by_owner_and_kind() {
    let mut bodies = MethodBodies::new();
    assert!(bodies.is_empty());
    bodies.insert("Person", MethodKind::Instance, "description", "function a() {}");
    bodies.insert("Person", MethodKind::Class, "description", "function b() {}");
    bodies.insert("Dog", MethodKind::Instance, "description", "function c() {}");
    assert_eq!(bodies.len(), 3);
    assert_eq!(
        bodies.get("Person", MethodKind::Instance, "description"),
        Some("function a() {}")
    );
    assert_eq!(
        bodies.get("Person", MethodKind::Class, "description"),
        Some("function b() {}")
    );
    assert_eq!(
        bodies.get("Dog", MethodKind::Instance, "description"),
        Some("function c() {}")
    );
    assert_eq!(bodies.get("Person", MethodKind::Instance, "init"), None);
    assert_eq!(
        MethodBodies::category_owner("Person", "Birthday"),
        "Person (Birthday)"
    );
}

#[test]
fn test_override_keeps_its_own_body() {
    let mut object = ClassModel::new("CPObject", Span::default());
    object.add_instance_method(method("init", &["id"]));
    let mut dog = ClassModel::new("Dog", Span::default()).with_superclass("CPObject");
    dog.add_instance_method(method("init", &["id"]));
    let mut registry = ModelRegistry::new();
    registry.add_class(object);
    registry.add_class(dog);

    let mut bodies = MethodBodies::new();
    bodies.insert(
        "CPObject",
        MethodKind::Instance,
        "init",
        "function $CPObject__init(self, _cmd)\n{\n    return self;\n}",
    );
    bodies.insert(
        "Dog",
        MethodKind::Instance,
        "init",
        "function $Dog__init(self, _cmd)\n{\n    self.barks = YES;\n    return self;\n}",
    );

    let code = generate(&registry, &bodies, &CodegenOptions::new()).unwrap();
    let (object_code, dog_code) = code
        .split_once("// @implementation Dog : CPObject")
        .unwrap();
    assert_eq!(code.matches("function $CPObject__init(self, _cmd)").count(), 1);
    assert!(object_code.contains("function $CPObject__init(self, _cmd)"));
    assert!(dog_code.contains("function $Dog__init(self, _cmd)"));
    assert!(!dog_code.contains("$CPObject__init"));
}

#[test]
fn test_applied_category_stays_out_of_class_bootstrap() {
    let mut list = ClassModel::new("List", Span::default()).with_superclass("CPObject");
    list.add_instance_method(method("sort", &["void"]));
    let mut registry = ModelRegistry::new();
    registry.add_class(ClassModel::new("CPObject", Span::default()));
    registry.add_class(list);

    let mut category = CategoryModel::new("List", "Fast", Span::default());
    category.add_instance_method(method("sort", &["id"]));
    category.add_instance_method(method("shuffle", &["void"]));
    registry.apply_category(&category).unwrap();

    let class_code =
        generate_class(&registry, "List", &MethodBodies::new(), &CodegenOptions::new()).unwrap();
    assert!(class_code.contains("// - (void)sort"));
    assert!(!class_code.contains("// - (id)sort"));
    assert!(!class_code.contains("shuffle"));

    let mut bodies = MethodBodies::new();
    bodies.insert(
        MethodBodies::category_owner("List", "Fast"),
        MethodKind::Instance,
        "sort",
        "function $List__sort(self, _cmd)\n{\n    return self;\n}",
    );
    let category_code =
        generate_category(&registry, &category, &bodies, &CodegenOptions::new()).unwrap();
    assert!(category_code.contains("// - (id)sort"));
    assert!(category_code.contains("function $List__sort(self, _cmd)"));
    assert!(category_code.contains("$List__shuffle,"));
    assert!(!category_code.contains("(void)sort"));

    // Lookup still answers with the category's method.
    let list = registry.class("List").unwrap();
    let sort = list.get_instance_method(&registry, "sort").unwrap();
    assert_eq!(sort.return_type(), "id");
    assert_eq!(list.get_own_instance_method("sort").unwrap().return_type(), "void");
}

#[test]
fn test_error_messages() {
    let err = CodeGenError::UnknownInstanceVariable {
        class: "Counter".into(),
        selector: "count".into(),
        ivar: "count".into(),
    };
    assert_eq!(
        err.to_string(),
        "accessor `count` of class `Counter` refers to unknown instance variable `count`"
    );
}
