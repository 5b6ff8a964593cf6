use std::collections::HashMap;

use super::super::ast::BasicType;
use super::super::ast::operators::BinaryOperation;

/// TypeId is an opaque handle to an interned type descriptor. Structurally
/// equal types always share one id, so type equality is id equality and
/// every predicate below is a constant time lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(usize);

/// TypeDescriptor is the structural description of an Asl type. `Void`
/// only ever appears as a function return type. `Error` is the sentinel
/// produced by failed lookups and checks; it absorbs every operation it
/// participates in so one mistake is reported once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Integer,
    Float,
    Character,
    Boolean,
    Void,
    Error,
    Array {
        size: u32,
        element: TypeId
    },
    Function {
        params: Vec<TypeId>,
        ret: TypeId
    }
}

/// TypesMgr is the factory and registry for type descriptors. Construction
/// interns: asking twice for the same structural type returns the same
/// TypeId (hash consing), so ids from one manager are always comparable.
pub struct TypesMgr {
    descriptors: Vec<TypeDescriptor>,
    interned: HashMap<TypeDescriptor, TypeId>
}

impl TypesMgr {
    pub fn new() -> Self {
        TypesMgr {
            descriptors: vec![],
            interned: HashMap::new()
        }
    }

    fn intern(&mut self, descriptor: TypeDescriptor) -> TypeId {
        if let Some(id) = self.interned.get(&descriptor) {
            return *id;
        }
        let id = TypeId(self.descriptors.len());
        self.descriptors.push(descriptor.clone());
        self.interned.insert(descriptor, id);
        id
    }

    fn get(&self, id: TypeId) -> &TypeDescriptor {
        &self.descriptors[id.0]
    }

    pub fn create_integer_ty(&mut self) -> TypeId {
        self.intern(TypeDescriptor::Integer)
    }

    pub fn create_float_ty(&mut self) -> TypeId {
        self.intern(TypeDescriptor::Float)
    }

    pub fn create_character_ty(&mut self) -> TypeId {
        self.intern(TypeDescriptor::Character)
    }

    pub fn create_boolean_ty(&mut self) -> TypeId {
        self.intern(TypeDescriptor::Boolean)
    }

    pub fn create_void_ty(&mut self) -> TypeId {
        self.intern(TypeDescriptor::Void)
    }

    pub fn create_error_ty(&mut self) -> TypeId {
        self.intern(TypeDescriptor::Error)
    }

    pub fn create_array_ty(&mut self, size: u32, element: TypeId) -> TypeId {
        self.intern(TypeDescriptor::Array { size, element })
    }

    pub fn create_function_ty(&mut self, params: Vec<TypeId>, ret: TypeId) -> TypeId {
        self.intern(TypeDescriptor::Function { params, ret })
    }

    /// Resolve a lexical basic type name into its interned type
    pub fn create_basic_ty(&mut self, basic: BasicType) -> TypeId {
        match basic {
            BasicType::Int => self.create_integer_ty(),
            BasicType::Float => self.create_float_ty(),
            BasicType::Bool => self.create_boolean_ty(),
            BasicType::Char => self.create_character_ty()
        }
    }

    pub fn is_integer_ty(&self, id: TypeId) -> bool {
        matches!(self.get(id), TypeDescriptor::Integer)
    }

    pub fn is_float_ty(&self, id: TypeId) -> bool {
        matches!(self.get(id), TypeDescriptor::Float)
    }

    pub fn is_character_ty(&self, id: TypeId) -> bool {
        matches!(self.get(id), TypeDescriptor::Character)
    }

    pub fn is_boolean_ty(&self, id: TypeId) -> bool {
        matches!(self.get(id), TypeDescriptor::Boolean)
    }

    pub fn is_void_ty(&self, id: TypeId) -> bool {
        matches!(self.get(id), TypeDescriptor::Void)
    }

    pub fn is_error_ty(&self, id: TypeId) -> bool {
        matches!(self.get(id), TypeDescriptor::Error)
    }

    pub fn is_numeric_ty(&self, id: TypeId) -> bool {
        self.is_integer_ty(id) || self.is_float_ty(id)
    }

    /// Primitive means any scalar value type: integer, float, character or
    /// boolean.
    pub fn is_primitive_ty(&self, id: TypeId) -> bool {
        matches!(
            self.get(id),
            TypeDescriptor::Integer | TypeDescriptor::Float | TypeDescriptor::Character | TypeDescriptor::Boolean
        )
    }

    pub fn is_array_ty(&self, id: TypeId) -> bool {
        matches!(self.get(id), TypeDescriptor::Array { .. })
    }

    pub fn is_function_ty(&self, id: TypeId) -> bool {
        matches!(self.get(id), TypeDescriptor::Function { .. })
    }

    pub fn get_array_size(&self, id: TypeId) -> usize {
        match self.get(id) {
            TypeDescriptor::Array { size, .. } => *size as usize,
            other => panic!("Type {:?} is not an array type", other)
        }
    }

    pub fn get_array_elem_type(&self, id: TypeId) -> TypeId {
        match self.get(id) {
            TypeDescriptor::Array { element, .. } => *element,
            other => panic!("Type {:?} is not an array type", other)
        }
    }

    pub fn get_num_of_parameters(&self, id: TypeId) -> usize {
        match self.get(id) {
            TypeDescriptor::Function { params, .. } => params.len(),
            other => panic!("Type {:?} is not a function type", other)
        }
    }

    pub fn get_parameter_type(&self, id: TypeId, i: usize) -> TypeId {
        match self.get(id) {
            TypeDescriptor::Function { params, .. } => params[i],
            other => panic!("Type {:?} is not a function type", other)
        }
    }

    pub fn get_func_return_type(&self, id: TypeId) -> TypeId {
        match self.get(id) {
            TypeDescriptor::Function { ret, .. } => *ret,
            other => panic!("Type {:?} is not a function type", other)
        }
    }

    /// Size of a value of this type in VM cells. Scalars take one cell,
    /// arrays one cell per element.
    pub fn get_size_of_type(&self, id: TypeId) -> usize {
        match self.get(id) {
            TypeDescriptor::Array { size, element } => *size as usize * self.get_size_of_type(*element),
            _ => 1
        }
    }

    /// Assignment compatibility: a source value can be stored into a target
    /// location iff the types are equal, the target widens an integer into
    /// a float, or either side already failed (error absorbs the check).
    pub fn copyable_types(&self, target: TypeId, source: TypeId) -> bool {
        if self.is_error_ty(target) || self.is_error_ty(source) {
            return true;
        }
        target == source || (self.is_float_ty(target) && self.is_integer_ty(source))
    }

    /// Comparison compatibility. Equality accepts matching families
    /// (numeric with numeric, boolean with boolean, character with
    /// character); the ordering operators accept numeric operands only.
    pub fn comparable_types(&self, a: TypeId, b: TypeId, op: BinaryOperation) -> bool {
        if op.is_equality() {
            (self.is_numeric_ty(a) && self.is_numeric_ty(b))
                || (self.is_boolean_ty(a) && self.is_boolean_ty(b))
                || (self.is_character_ty(a) && self.is_character_ty(b))
        } else if op.is_ordering() {
            self.is_numeric_ty(a) && self.is_numeric_ty(b)
        } else {
            false
        }
    }
}
