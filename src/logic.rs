crate::reexport!(cursor);
crate::reexport!(listener);
crate::reexport!(language);
crate::reexport!(atn);
crate::reexport!(collector);
crate::reexport!(datatype);
