//! Element decoding for the parse tree wire format.
//!
//! Each variant body is a fixed sequence of fields; the only branch in the
//! whole format lives in the declaration-use decoder.

use crate::codec::declaration::{
    decode_declaration, decode_declaration_use, decode_namespace_item, decode_string_list,
    decode_type_declaration,
};
use crate::codec::namespace::decode_namespace;
use crate::codec::primitives::Reader;
use crate::codec::tree::DecodeOptions;
use crate::error::DecodeError;
use crate::model::{
    Action, AdapterDeclaration, ClassDeclaration, DatasetDeclaration, DoClassDeclaration,
    DupSpaceDeclaration, Element, ElementKind, MethodDeclaration, Namespace, Parameter,
    PropertyDeclaration, ProtocolDeclaration, ReturnValue, Rmc, SimpleTypeDeclaration,
    TemplateDeclaration, TemplateInstance, UnitDeclaration, Variable,
};

/// Decodes one tagged element. `depth` is the nesting depth of the
/// namespace the element belongs to.
pub fn decode_element<'a>(
    reader: &mut Reader<'a>,
    options: &DecodeOptions,
    depth: usize,
) -> Result<Element<'a>, DecodeError> {
    let offset = reader.position();
    let tag = reader.read_u8("element.tag")?;
    let kind = ElementKind::from_u8(tag).ok_or(DecodeError::UnknownVariant { tag, offset })?;

    let element = match kind {
        ElementKind::NamespaceItem => Element::NamespaceItem(decode_namespace_item(reader)?),
        ElementKind::Declaration => Element::Declaration(decode_declaration(reader, options, depth)?),
        ElementKind::DoClassDeclaration => {
            Element::DoClassDeclaration(decode_do_class_declaration(reader, options, depth)?)
        }
        ElementKind::DatasetDeclaration => {
            Element::DatasetDeclaration(decode_dataset_declaration(reader, options, depth)?)
        }
        ElementKind::TypeDeclaration => {
            Element::TypeDeclaration(decode_type_declaration(reader, options, depth)?)
        }
        ElementKind::Variable => Element::Variable(decode_variable(reader, options)?),
        ElementKind::Rmc => {
            let (method, parameters) = decode_method_with_parameters(reader, options, depth)?;
            Element::Rmc(Rmc { method, parameters })
        }
        ElementKind::Action => {
            let (method, parameters) = decode_method_with_parameters(reader, options, depth)?;
            Element::Action(Action { method, parameters })
        }
        ElementKind::AdapterDeclaration => Element::AdapterDeclaration(AdapterDeclaration {
            declaration: decode_declaration(reader, options, depth)?,
        }),
        ElementKind::PropertyDeclaration => {
            Element::PropertyDeclaration(decode_property_declaration(reader, options, depth)?)
        }
        ElementKind::ProtocolDeclaration => {
            let declaration = decode_declaration(reader, options, depth)?;
            let methods = decode_namespace(reader, options, depth + 1)?;
            Element::ProtocolDeclaration(ProtocolDeclaration { declaration, methods })
        }
        ElementKind::Parameter => Element::Parameter(decode_parameter(reader, options)?),
        ElementKind::ReturnValue => Element::ReturnValue(decode_return_value(reader, options)?),
        ElementKind::ClassDeclaration => {
            Element::ClassDeclaration(decode_class_declaration(reader, options, depth)?)
        }
        ElementKind::TemplateDeclaration => {
            let type_declaration = decode_type_declaration(reader, options, depth)?;
            let template_argument_count = reader.read_u32("template_declaration.argument_count")?;
            Element::TemplateDeclaration(TemplateDeclaration {
                type_declaration,
                template_argument_count,
            })
        }
        ElementKind::SimpleTypeDeclaration => Element::SimpleTypeDeclaration(SimpleTypeDeclaration {
            type_declaration: decode_type_declaration(reader, options, depth)?,
        }),
        ElementKind::TemplateInstance => {
            Element::TemplateInstance(decode_template_instance(reader, options, depth)?)
        }
        ElementKind::UnitDeclaration => {
            let declaration = decode_declaration(reader, options, depth)?;
            let unit_name = reader.read_string("unit_declaration.unit_name")?;
            let unit_directory = reader.read_string("unit_declaration.unit_directory")?;
            Element::UnitDeclaration(UnitDeclaration {
                declaration,
                unit_name,
                unit_directory,
            })
        }
        ElementKind::DupSpaceDeclaration => Element::DupSpaceDeclaration(DupSpaceDeclaration {
            declaration: decode_declaration(reader, options, depth)?,
        }),
    };

    Ok(element)
}

fn decode_do_class_declaration<'a>(
    reader: &mut Reader<'a>,
    options: &DecodeOptions,
    depth: usize,
) -> Result<DoClassDeclaration<'a>, DecodeError> {
    let declaration = decode_declaration(reader, options, depth)?;
    let parent_class_name = reader.read_string("do_class.parent_class_name")?;
    let class_id = reader.read_u32("do_class.class_id")?;
    let members = decode_namespace(reader, options, depth + 1)?;
    Ok(DoClassDeclaration {
        declaration,
        parent_class_name,
        class_id,
        members,
    })
}

fn decode_dataset_declaration<'a>(
    reader: &mut Reader<'a>,
    options: &DecodeOptions,
    depth: usize,
) -> Result<DatasetDeclaration<'a>, DecodeError> {
    let declaration = decode_declaration(reader, options, depth)?;
    let variables = decode_namespace(reader, options, depth + 1)?;
    Ok(DatasetDeclaration {
        declaration,
        variables,
    })
}

fn decode_variable<'a>(
    reader: &mut Reader<'a>,
    options: &DecodeOptions,
) -> Result<Variable<'a>, DecodeError> {
    let namespace_item = decode_namespace_item(reader)?;
    let declaration_use = decode_declaration_use(reader, options)?;
    let array_size = reader.read_u32("variable.array_size")?;
    Ok(Variable {
        namespace_item,
        declaration_use,
        array_size,
    })
}

fn decode_method_with_parameters<'a>(
    reader: &mut Reader<'a>,
    options: &DecodeOptions,
    depth: usize,
) -> Result<(MethodDeclaration<'a>, Namespace<'a>), DecodeError> {
    let declaration = decode_declaration(reader, options, depth)?;
    let members = decode_namespace(reader, options, depth + 1)?;
    let parameters = decode_namespace(reader, options, depth + 1)?;
    Ok((MethodDeclaration { declaration, members }, parameters))
}

fn decode_property_declaration<'a>(
    reader: &mut Reader<'a>,
    options: &DecodeOptions,
    depth: usize,
) -> Result<PropertyDeclaration<'a>, DecodeError> {
    let declaration = decode_declaration(reader, options, depth)?;
    let category_mask = reader.read_u32("property.category_mask")?;
    let allowed_target_mask = reader.read_u32("property.allowed_target_mask")?;
    Ok(PropertyDeclaration {
        declaration,
        category_mask,
        allowed_target_mask,
    })
}

fn decode_parameter<'a>(
    reader: &mut Reader<'a>,
    options: &DecodeOptions,
) -> Result<Parameter<'a>, DecodeError> {
    let variable = decode_variable(reader, options)?;
    let declaration_use = decode_declaration_use(reader, options)?;
    let array_size = reader.read_u32("parameter.array_size")?;
    let parameter_type = reader.read_u8("parameter.type")?;
    Ok(Parameter {
        variable,
        declaration_use,
        array_size,
        parameter_type,
    })
}

fn decode_return_value<'a>(
    reader: &mut Reader<'a>,
    options: &DecodeOptions,
) -> Result<ReturnValue<'a>, DecodeError> {
    let variable = decode_variable(reader, options)?;
    let declaration_use = decode_declaration_use(reader, options)?;
    let array_size = reader.read_u32("return_value.array_size")?;
    Ok(ReturnValue {
        variable,
        declaration_use,
        array_size,
    })
}

fn decode_class_declaration<'a>(
    reader: &mut Reader<'a>,
    options: &DecodeOptions,
    depth: usize,
) -> Result<ClassDeclaration<'a>, DecodeError> {
    let type_declaration = decode_type_declaration(reader, options, depth)?;
    let parent_class_name = reader.read_string("class.parent_class_name")?;
    let members = decode_namespace(reader, options, depth + 1)?;
    Ok(ClassDeclaration {
        type_declaration,
        parent_class_name,
        members,
    })
}

fn decode_template_instance<'a>(
    reader: &mut Reader<'a>,
    options: &DecodeOptions,
    depth: usize,
) -> Result<TemplateInstance<'a>, DecodeError> {
    let type_declaration = decode_type_declaration(reader, options, depth)?;
    let base_type_name = reader.read_string("template_instance.base_type_name")?;
    let count = reader.read_count("template_instance.argument_count")?;
    let template_arguments = decode_string_list(reader, count, "template_instance.argument")?;
    Ok(TemplateInstance {
        type_declaration,
        base_type_name,
        template_arguments,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::codec::primitives::Writer;
    use crate::error::ErrorKind;

    /// Writes a declaration header with an empty property namespace.
    pub(crate) fn write_declaration(w: &mut Writer, first: &str, second: &str) {
        w.write_string(first).write_string(second).write_string("unit").write_u32(0);
    }

    pub(crate) fn write_variable(w: &mut Writer, name: &str, type_name: &str) {
        w.write_string(name).write_string("");
        w.write_u8(17).write_string(type_name);
        w.write_u32(0);
    }

    fn decode(bytes: &[u8]) -> (Element<'_>, usize) {
        let mut reader = Reader::new(bytes);
        let element = decode_element(&mut reader, &DecodeOptions::default(), 0).unwrap();
        (element, reader.position())
    }

    #[test]
    fn test_namespace_item_element() {
        let mut w = Writer::new();
        w.write_u8(1).write_string("Auth").write_string("Login");
        let (element, consumed) = decode(w.as_bytes());
        assert_eq!(element.kind(), ElementKind::NamespaceItem);
        assert_eq!(element.name(), "Auth::Login");
        assert_eq!(consumed, w.len());
    }

    #[test]
    fn test_do_class_declaration() {
        let mut w = Writer::new();
        w.write_u8(3);
        write_declaration(&mut w, "", "Avatar");
        w.write_string("DataObject").write_u32(0x1234).write_u32(0);

        let (element, consumed) = decode(w.as_bytes());
        let Element::DoClassDeclaration(class) = element else {
            panic!("expected DOClassDeclaration");
        };
        assert_eq!(class.parent_class_name, "DataObject");
        assert_eq!(class.class_id, 0x1234);
        assert!(class.members.is_empty());
        assert_eq!(consumed, w.len());
    }

    #[test]
    fn test_property_declaration_masks() {
        let mut w = Writer::new();
        w.write_u8(11);
        write_declaration(&mut w, "", "health");
        w.write_u32(0x0000_00F0).write_u32(0x8000_0001);

        let (element, consumed) = decode(w.as_bytes());
        let Element::PropertyDeclaration(prop) = element else {
            panic!("expected PropertyDeclaration");
        };
        assert_eq!(prop.category_mask, 0xF0);
        assert_eq!(prop.allowed_target_mask, 0x8000_0001);
        assert_eq!(consumed, w.len());
    }

    #[test]
    fn test_rmc_with_parameters() {
        let mut w = Writer::new();
        w.write_u8(8);
        write_declaration(&mut w, "", "Login");
        w.write_u32(0); // method members
        w.write_u32(2); // parameters
        w.write_u8(13);
        write_variable(&mut w, "user", "string");
        w.write_u8(17).write_string("string").write_u32(0).write_u8(1);
        w.write_u8(14);
        write_variable(&mut w, "result", "qresult");
        w.write_u8(17).write_string("qresult").write_u32(0);

        let (element, consumed) = decode(w.as_bytes());
        assert_eq!(consumed, w.len());
        let Element::Rmc(rmc) = element else {
            panic!("expected RMC");
        };
        assert_eq!(rmc.method.declaration.namespace_item.display_name(), "Login");
        assert_eq!(rmc.parameters.len(), 2);

        let Element::Parameter(param) = &rmc.parameters.elements[0] else {
            panic!("expected Parameter");
        };
        assert_eq!(param.variable.namespace_item.first.name, "user");
        assert_eq!(param.parameter_type, 1);
        assert_eq!(rmc.parameters.elements[1].kind(), ElementKind::ReturnValue);
    }

    #[test]
    fn test_action_has_rmc_layout() {
        let mut w = Writer::new();
        w.write_u8(9);
        write_declaration(&mut w, "", "Jump");
        w.write_u32(0).write_u32(0);

        let (element, consumed) = decode(w.as_bytes());
        assert_eq!(element.kind(), ElementKind::Action);
        assert_eq!(consumed, w.len());
    }

    #[test]
    fn test_class_with_members() {
        let mut w = Writer::new();
        w.write_u8(15);
        write_declaration(&mut w, "", "Player");
        w.write_string("Entity").write_u32(1);
        w.write_u8(6);
        write_variable(&mut w, "score", "uint32");

        let (element, consumed) = decode(w.as_bytes());
        assert_eq!(consumed, w.len());
        let Element::ClassDeclaration(class) = element else {
            panic!("expected ClassDeclaration");
        };
        assert_eq!(class.parent_class_name, "Entity");
        let Element::Variable(var) = &class.members.elements[0] else {
            panic!("expected Variable");
        };
        assert_eq!(var.declaration_use.name, "uint32");
    }

    #[test]
    fn test_template_declaration_and_instance() {
        let mut w = Writer::new();
        w.write_u8(16);
        write_declaration(&mut w, "", "std_list");
        w.write_u32(1);
        let (element, consumed) = decode(w.as_bytes());
        assert_eq!(consumed, w.len());
        let Element::TemplateDeclaration(template) = element else {
            panic!("expected TemplateDeclaration");
        };
        assert_eq!(template.template_argument_count, 1);

        let mut w = Writer::new();
        w.write_u8(18);
        write_declaration(&mut w, "", "std_map<uint32,string>");
        w.write_string("std_map").write_u32(2).write_string("uint32").write_string("string");
        let (element, consumed) = decode(w.as_bytes());
        assert_eq!(consumed, w.len());
        let Element::TemplateInstance(instance) = element else {
            panic!("expected TemplateInstance");
        };
        assert_eq!(instance.base_type_name, "std_map");
        assert_eq!(instance.template_arguments.len(), 2);
        assert_eq!(instance.template_arguments[0], "uint32");
        assert_eq!(instance.template_arguments[1], "string");
    }

    #[test]
    fn test_unit_declaration() {
        let mut w = Writer::new();
        w.write_u8(19);
        write_declaration(&mut w, "", "MatchMaking");
        w.write_string("MatchMaking").write_string("protocols/mm");

        let (element, consumed) = decode(w.as_bytes());
        assert_eq!(consumed, w.len());
        let Element::UnitDeclaration(unit) = element else {
            panic!("expected UnitDeclaration");
        };
        assert_eq!(unit.unit_directory, "protocols/mm");
    }

    #[test]
    fn test_header_only_variants() {
        for tag in [2u8, 5, 10, 17, 20] {
            let mut w = Writer::new();
            w.write_u8(tag);
            write_declaration(&mut w, "ns", "name");
            let (element, consumed) = decode(w.as_bytes());
            assert_eq!(element.kind().tag(), tag);
            assert_eq!(element.name(), "ns::name");
            assert_eq!(consumed, w.len());
        }
    }

    #[test]
    fn test_dataset_and_protocol() {
        let mut w = Writer::new();
        w.write_u8(4);
        write_declaration(&mut w, "", "Stats");
        w.write_u32(1).write_u8(6);
        write_variable(&mut w, "wins", "uint16");
        let (element, consumed) = decode(w.as_bytes());
        assert_eq!(consumed, w.len());
        assert_eq!(element.nested_namespaces()[1].len(), 1);

        let mut w = Writer::new();
        w.write_u8(12);
        write_declaration(&mut w, "", "Ranking");
        w.write_u32(0);
        let (element, consumed) = decode(w.as_bytes());
        assert_eq!(consumed, w.len());
        assert_eq!(element.kind(), ElementKind::ProtocolDeclaration);
    }

    #[test]
    fn test_unknown_tags() {
        for tag in [0u8, 7, 21, 255] {
            let data = [tag, 0, 0, 0, 0];
            let mut reader = Reader::at(&data, 0).unwrap();
            let err = decode_element(&mut reader, &DecodeOptions::default(), 0).unwrap_err();
            assert_eq!(err, DecodeError::UnknownVariant { tag, offset: 0 });
            assert_eq!(err.kind(), ErrorKind::UnknownVariant);
        }
    }
}
